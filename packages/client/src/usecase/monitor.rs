//! Channel-event reducer for the live monitoring view.
//!
//! Pure functions applying one channel event at a time to the store, in
//! arrival order. Roster mutation happens here and nowhere else while the
//! monitor is mounted.

use crate::domain::{AppStore, ChannelEvent, Warning};

/// What the monitoring loop must do after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Roster state changed, re-render
    RosterChanged,
    /// Reconcile with the authoritative source via the event loader
    RefetchRequired,
    /// Nothing to do
    Ignored,
    /// The channel is gone; enter the reconnect path
    ConnectionLost,
}

/// Apply one channel event to the store.
///
/// `user:update` upserts the full record by id. `user:warn` replaces the
/// warning list of a participant already in the roster with a single entry
/// and is ignored for unknown ids. `event:start` never mutates state
/// directly: the caller re-fetches the event so state transitions always
/// reconcile with the backend.
pub fn apply_channel_event(store: &mut AppStore, event: ChannelEvent) -> Applied {
    match event {
        ChannelEvent::UserUpdate(participant) => {
            store.roster_mut().upsert(participant);
            Applied::RosterChanged
        }
        ChannelEvent::UserWarn { user_id, amount } => match store.roster().get(user_id) {
            Some(participant) => {
                let mut updated = participant.clone();
                updated.warnings = vec![Warning { amount }];
                store.roster_mut().upsert(updated);
                Applied::RosterChanged
            }
            None => {
                tracing::debug!("Warn for unknown participant {}, ignored", user_id);
                Applied::Ignored
            }
        },
        ChannelEvent::EventStart => Applied::RefetchRequired,
        ChannelEvent::Disconnected => Applied::ConnectionLost,
    }
}

/// Whether the professor may launch the test.
///
/// Launching is only allowed while the event has not started yet.
pub fn can_start_quiz(store: &AppStore) -> bool {
    store.event().is_some_and(|event| event.in_future)
}
