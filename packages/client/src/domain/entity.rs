//! Core entities of the monitoring view.

use chrono::{DateTime, Utc};

/// Role permissions understood by the backend.
///
/// The value returned in `rolePermission` by the token validation endpoint
/// is compared against these constants to gate a page.
pub mod permission {
    pub const ADMIN: &str = "admin";
    pub const PROFESSOR: &str = "professeur";
    pub const STUDENT: &str = "eleve";
}

/// Connection state slugs pushed by the backend.
pub mod state {
    pub const ACTIVE: &str = "actif";
    pub const READY: &str = "pret";
}

/// Connection state of a participant (`actif`, `pret`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionState {
    pub slug: String,
    pub name: String,
}

/// A flagged irregularity during a live test.
///
/// Only the first warning of a participant is consulted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub amount: u32,
}

/// A student connected to an event, keyed by `id` in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub username: String,
    pub last_name: String,
    pub connection_state: Option<ConnectionState>,
    pub warnings: Vec<Warning>,
}

/// A quiz attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub strict: bool,
    pub shuffle: bool,
}

/// A scheduled classroom test session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub start: DateTime<Utc>,
    pub started: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub in_future: bool,
    pub quiz: Option<Quiz>,
    pub users: Option<Vec<Participant>>,
}

impl Event {
    /// Origin of the elapsed-time counter once the event has started.
    ///
    /// `started_at` when the backend recorded one, the scheduled start
    /// otherwise.
    pub fn counter_origin(&self) -> DateTime<Utc> {
        match (self.started, self.started_at) {
            (true, Some(started_at)) => started_at,
            _ => self.start,
        }
    }
}

/// A student group managed on the admin screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
}
