//! Pure presentation mappers.
//!
//! These functions derive display state from domain state and are callable
//! identically inside or outside the rendering loop, which keeps them
//! testable without any UI plumbing.

use super::entity::{ConnectionState, Event, Warning, state};

/// Number of warning dots always rendered per participant.
pub const WARNING_DOTS: usize = 3;

/// Display color of a participant status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
}

/// A participant status badge (label + color).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub color: StatusColor,
    pub label: String,
}

/// Map a participant connection state to its display badge.
///
/// `actif` is green and `pret` yellow, both labelled with the state name
/// pushed by the backend; any other or missing state renders as a red
/// "Inactif".
pub fn status_badge(connection_state: Option<&ConnectionState>) -> StatusBadge {
    match connection_state {
        Some(s) if s.slug == state::ACTIVE => StatusBadge {
            color: StatusColor::Green,
            label: s.name.clone(),
        },
        Some(s) if s.slug == state::READY => StatusBadge {
            color: StatusColor::Yellow,
            label: s.name.clone(),
        },
        _ => StatusBadge {
            color: StatusColor::Red,
            label: "Inactif".to_string(),
        },
    }
}

/// One warning dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dot {
    Yellow,
    Red,
    Neutral,
}

/// Map a participant's warning list to exactly three dots.
///
/// The shown amount is `min(first warning amount, 3)`; active dots come
/// first (two yellow, then one red), the remainder is neutral.
pub fn warning_dots(warnings: &[Warning]) -> [Dot; WARNING_DOTS] {
    let amount = warnings
        .first()
        .map(|w| (w.amount as usize).min(WARNING_DOTS))
        .unwrap_or(0);

    let mut dots = [Dot::Neutral; WARNING_DOTS];
    for (index, dot) in dots.iter_mut().enumerate().take(amount) {
        *dot = if index < 2 { Dot::Yellow } else { Dot::Red };
    }
    dots
}

/// Kind of the event badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Success,
    Error,
}

/// The live/upcoming badge shown next to the page title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBadge {
    pub kind: BadgeKind,
    pub label: &'static str,
}

/// Derive the event badge: none without an event, `live` while the event
/// is running, `upcoming` before it starts.
pub fn event_badge(event: Option<&Event>) -> Option<EventBadge> {
    let event = event?;

    if !event.in_future {
        Some(EventBadge {
            kind: BadgeKind::Error,
            label: "live",
        })
    } else {
        Some(EventBadge {
            kind: BadgeKind::Success,
            label: "upcoming",
        })
    }
}
