//! Domain model of the monitoring view.
//!
//! Entities, the live roster, the typed application store, the channel event
//! vocabulary and the pure derivation functions (badges, timer) live here.
//! Nothing in this module performs I/O.

mod channel;
mod entity;
mod gateway;
mod roster;
mod store;
pub mod timer;
pub mod view;

pub use channel::ChannelEvent;
pub use entity::{ConnectionState, Event, Group, Participant, Quiz, Warning, permission, state};
pub use gateway::{AuthGateway, EventGateway, GatewayError, GroupGateway, TokenValidation};
pub use roster::Roster;
pub use store::{AppStore, Notification, NotificationKind, Route};

#[cfg(test)]
pub use gateway::{MockAuthGateway, MockEventGateway, MockGroupGateway};
