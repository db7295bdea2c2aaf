//! Timer display state machine.
//!
//! The monitoring page shows either a countdown to the event start or an
//! elapsed-time counter once the event is running. The transition from
//! Countdown to Elapsed is driven by a fresh event fetch flipping
//! `in_future`; there is no transition back for the lifetime of the page.

use chrono::{DateTime, Utc};
use terakoya_shared::time::{Clock, format_duration_hms};

use super::entity::Event;

/// The two timer views of the monitoring page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerView {
    /// The event has not started yet; ticking down to `until`.
    Countdown { until: DateTime<Utc> },
    /// The event is running; ticking up from `since`.
    Elapsed { since: DateTime<Utc> },
}

impl TimerView {
    /// Select the timer view for a freshly loaded event.
    pub fn for_event(event: &Event) -> Self {
        if event.in_future {
            TimerView::Countdown { until: event.start }
        } else {
            TimerView::Elapsed {
                since: event.counter_origin(),
            }
        }
    }

    /// Re-derive the view after an event re-fetch.
    ///
    /// Countdown follows the event; Elapsed is terminal and never reverts,
    /// even if a later payload claims the event is in the future again.
    pub fn advance(self, event: &Event) -> Self {
        match self {
            TimerView::Countdown { .. } => Self::for_event(event),
            elapsed @ TimerView::Elapsed { .. } => elapsed,
        }
    }

    /// Whether the elapsed counter is showing
    pub fn is_elapsed(&self) -> bool {
        matches!(self, TimerView::Elapsed { .. })
    }

    /// Render the timer as text for the current tick.
    ///
    /// A pure display recomputation: no state is mutated, the remaining or
    /// elapsed duration is derived from the clock each call.
    pub fn render(&self, clock: &dyn Clock) -> String {
        let now = clock.now_utc_millis();
        match self {
            TimerView::Countdown { until } => {
                let remaining = until.timestamp_millis() - now;
                format!("Starts in {}", format_duration_hms(remaining))
            }
            TimerView::Elapsed { since } => {
                let elapsed = now - since.timestamp_millis();
                format!("Running for {}", format_duration_hms(elapsed))
            }
        }
    }
}
