//! Typed application store for the monitoring page.
//!
//! Shared page state (session token, current event, quiz, roster,
//! notification queue) lives in one explicit struct with defined action
//! methods, instead of ambient mutable globals.

use super::entity::{Event, Quiz};
use super::roster::Roster;

/// Navigation targets of the monitoring client.
///
/// A use case never navigates by itself; it returns one of these and the
/// caller decides how to leave the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    ProfessorHome,
    AdminGroups,
}

impl Route {
    /// Path of the route on the web frontend
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::ProfessorHome => "/professor",
            Route::AdminGroups => "/admin/groups",
        }
    }
}

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A user-visible notification (the only inline failure surface).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Shared state of one monitoring page instance.
#[derive(Debug, Default)]
pub struct AppStore {
    token: Option<String>,
    event: Option<Event>,
    quiz: Option<Quiz>,
    roster: Roster,
    notifications: Vec<Notification>,
}

impl AppStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the validated session token
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// The validated session token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Install a freshly loaded event.
    ///
    /// Clears the roster first so no stale cross-event data survives, then
    /// seeds quiz and roster from the event payload.
    pub fn begin_event(&mut self, event: Event) {
        self.roster.clear();

        if let Some(quiz) = &event.quiz {
            self.quiz = Some(quiz.clone());
        }
        if let Some(users) = &event.users {
            self.roster.add_many(users.clone());
        }

        self.event = Some(event);
    }

    /// Drop the current event and its derived state (page teardown).
    pub fn end_event(&mut self) {
        self.event = None;
        self.quiz = None;
        self.roster.clear();
    }

    /// The current event, if one is loaded
    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    /// The quiz of the current event, if any
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    /// The live roster
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Mutable access for the channel-event reducer
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Queue an informational notification
    pub fn push_info(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind: NotificationKind::Info,
            message: message.into(),
        });
    }

    /// Queue an error notification
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.notifications.push(Notification {
            kind: NotificationKind::Error,
            message: message.into(),
        });
    }

    /// Take all pending notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
