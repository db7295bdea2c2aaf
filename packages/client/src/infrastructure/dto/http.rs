//! REST API payloads.
//!
//! Field names follow the backend wire format (camelCase).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `POST /auth/validateToken`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(default)]
    pub role_permission: Option<String>,
}

/// Connection state of a participant on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDto {
    pub slug: String,
    pub name: String,
}

/// One warning entry on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarnDto {
    pub amount: u32,
}

/// A participant record as pushed and fetched from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: i64,
    pub username: String,
    pub last_name: String,
    #[serde(default)]
    pub state: Option<StateDto>,
    #[serde(default)]
    pub event_warns: Vec<WarnDto>,
}

/// A quiz attached to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub strict: bool,
    pub shuffle: bool,
}

/// Response of `GET /api/events/current`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub start: DateTime<Utc>,
    pub started: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub in_future: bool,
    #[serde(default)]
    pub quiz: Option<QuizDto>,
    #[serde(default)]
    pub users: Option<Vec<ParticipantDto>>,
}

/// A group resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    pub id: String,
    pub name: String,
}

/// Request body of `POST /api/groups`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
}
