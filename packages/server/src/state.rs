//! Server state and monitor connection management.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, mpsc};

use crate::dto::{EventDto, GroupDto, ParticipantDto, QuizDto, WarnDto};

/// A known session (token → role).
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role_permission: String,
}

/// The current event with its participants.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub start: DateTime<Utc>,
    pub started: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub quiz: QuizDto,
    pub users: Vec<ParticipantDto>,
}

impl EventRecord {
    /// Whether the event still lies in the future at `now`
    pub fn in_future(&self, now: DateTime<Utc>) -> bool {
        !self.started && self.start > now
    }

    /// Wire representation of the event at `now`
    pub fn to_dto(&self, now: DateTime<Utc>) -> EventDto {
        EventDto {
            start: self.start,
            started: self.started,
            started_at: self.started_at,
            in_future: self.in_future(now),
            quiz: Some(self.quiz.clone()),
            users: Some(self.users.clone()),
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Known sessions, keyed by token
    pub sessions: Mutex<HashMap<String, Session>>,
    /// Group resource
    pub groups: Mutex<Vec<GroupDto>>,
    /// The current event, if one is scheduled
    pub event: Mutex<Option<EventRecord>>,
    /// Connected monitors and their push senders, keyed by connection id
    pub monitors: Mutex<HashMap<String, mpsc::UnboundedSender<String>>>,
}

impl AppState {
    /// Create an empty state (no sessions, no event).
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            groups: Mutex::new(Vec::new()),
            event: Mutex::new(None),
            monitors: Mutex::new(HashMap::new()),
        }
    }

    /// Look up the session of a token
    pub async fn session_for(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(token).cloned()
    }

    /// Register a monitor connection
    pub async fn register_monitor(&self, id: String, sender: mpsc::UnboundedSender<String>) {
        let mut monitors = self.monitors.lock().await;
        monitors.insert(id.clone(), sender);
        tracing::debug!("Monitor '{}' registered", id);
    }

    /// Remove a monitor connection
    pub async fn unregister_monitor(&self, id: &str) {
        let mut monitors = self.monitors.lock().await;
        monitors.remove(id);
        tracing::debug!("Monitor '{}' unregistered", id);
    }

    /// Push a message to every connected monitor.
    pub async fn broadcast(&self, message: &str) {
        let monitors = self.monitors.lock().await;
        for (id, sender) in monitors.iter() {
            if sender.send(message.to_string()).is_err() {
                tracing::warn!("Failed to push to monitor '{}'", id);
            }
        }
    }

    /// The current event as a wire payload
    pub async fn current_event_dto(&self) -> Option<EventDto> {
        let event = self.event.lock().await;
        event.as_ref().map(|record| record.to_dto(Utc::now()))
    }

    /// Mark the event started.
    ///
    /// Returns `true` only on the transition; an already started or missing
    /// event returns `false` and nothing changes.
    pub async fn start_event(&self) -> bool {
        let mut event = self.event.lock().await;
        match event.as_mut() {
            Some(record) if !record.started => {
                record.started = true;
                record.started_at = Some(Utc::now());
                tracing::info!("Event started");
                true
            }
            _ => false,
        }
    }

    /// Replace-or-append a participant of the current event by id.
    ///
    /// Returns `false` when no event is scheduled.
    pub async fn upsert_user(&self, user: ParticipantDto) -> bool {
        let mut event = self.event.lock().await;
        let Some(record) = event.as_mut() else {
            return false;
        };
        match record.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => record.users.push(user),
        }
        true
    }

    /// Replace the warning list of a participant with a single entry.
    ///
    /// Returns `false` when no event is scheduled or the participant is
    /// unknown.
    pub async fn warn_user(&self, user_id: i64, amount: u32) -> bool {
        let mut event = self.event.lock().await;
        let Some(record) = event.as_mut() else {
            return false;
        };
        match record.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.event_warns = vec![WarnDto { amount }];
                true
            }
            None => false,
        }
    }

    /// Create a group, rejecting duplicate names.
    pub async fn create_group(&self, id: String, name: &str) -> Option<GroupDto> {
        let mut groups = self.groups.lock().await;
        if groups.iter().any(|group| group.name == name) {
            return None;
        }
        let group = GroupDto {
            id,
            name: name.to_string(),
        };
        groups.push(group.clone());
        Some(group)
    }

    /// All groups
    pub async fn groups(&self) -> Vec<GroupDto> {
        let groups = self.groups.lock().await;
        groups.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
