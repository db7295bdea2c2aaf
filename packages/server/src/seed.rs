//! Demo data for development and integration tests.

use chrono::{Duration, Utc};

use crate::dto::{ParticipantDto, QuizDto, StateDto};
use crate::state::{AppState, EventRecord, Session};

/// Token of the seeded professor session
pub const PROFESSOR_TOKEN: &str = "professor-token";
/// Token of the seeded admin session
pub const ADMIN_TOKEN: &str = "admin-token";
/// Token of the seeded student session
pub const STUDENT_TOKEN: &str = "student-token";

/// Build a demo state: three sessions and one upcoming event.
///
/// `start_in_secs` places the event start relative to now; a zero or
/// negative value makes the event startable immediately.
pub fn demo_state(start_in_secs: i64) -> AppState {
    let state = AppState::new();

    {
        let mut sessions = state
            .sessions
            .try_lock()
            .expect("state is not shared during seeding");
        sessions.insert(
            PROFESSOR_TOKEN.to_string(),
            Session {
                username: "marie".to_string(),
                role_permission: "professeur".to_string(),
            },
        );
        sessions.insert(
            ADMIN_TOKEN.to_string(),
            Session {
                username: "admin".to_string(),
                role_permission: "admin".to_string(),
            },
        );
        sessions.insert(
            STUDENT_TOKEN.to_string(),
            Session {
                username: "alice".to_string(),
                role_permission: "eleve".to_string(),
            },
        );
    }

    {
        let mut event = state
            .event
            .try_lock()
            .expect("state is not shared during seeding");
        *event = Some(EventRecord {
            start: Utc::now() + Duration::seconds(start_in_secs),
            started: false,
            started_at: None,
            quiz: QuizDto {
                id: 1,
                title: "Les fractions".to_string(),
                slug: "les-fractions".to_string(),
                strict: true,
                shuffle: false,
            },
            users: vec![
                ParticipantDto {
                    id: 1,
                    username: "alice".to_string(),
                    last_name: "Martin".to_string(),
                    state: Some(StateDto {
                        slug: "actif".to_string(),
                        name: "Actif".to_string(),
                    }),
                    event_warns: Vec::new(),
                },
                ParticipantDto {
                    id: 2,
                    username: "bob".to_string(),
                    last_name: "Durand".to_string(),
                    state: Some(StateDto {
                        slug: "pret".to_string(),
                        name: "Prêt".to_string(),
                    }),
                    event_warns: Vec::new(),
                },
                ParticipantDto {
                    id: 3,
                    username: "chloe".to_string(),
                    last_name: "Petit".to_string(),
                    state: None,
                    event_warns: Vec::new(),
                },
            ],
        });
    }

    state
}
