//! Typed event vocabulary of the real-time channel.

use super::entity::Participant;

/// An event delivered by the real-time channel.
///
/// The transport parses wire messages into this enum; the monitoring loop
/// applies them one at a time in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Full participant record to upsert into the roster
    UserUpdate(Participant),
    /// Warning count change for a participant already in the roster
    UserWarn { user_id: i64, amount: u32 },
    /// The event started; re-fetch from the authoritative source
    EventStart,
    /// The connection was lost or closed by the server
    Disconnected,
}
