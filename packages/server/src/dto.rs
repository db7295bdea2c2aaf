//! Wire payloads of the stand-in backend.
//!
//! Field names follow the platform wire format (camelCase); channel
//! messages are JSON objects tagged by `type`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `POST /auth/validateToken`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub role_permission: Option<String>,
}

/// Connection state of a participant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDto {
    pub slug: String,
    pub name: String,
}

/// One warning entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarnDto {
    pub amount: u32,
}

/// A participant of the current event
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
    pub started_at: Option<DateTime<Utc>>,
    pub in_future: bool,
    pub quiz: Option<QuizDto>,
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
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Request body of `POST /debug/users/{id}/warn`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarnRequest {
    pub amount: u32,
}

/// Messages received from monitors on the channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum IncomingMessage {
    /// A monitor joined the event scope
    #[serde(rename = "user:join")]
    UserJoin,

    /// The professor launched the test
    #[serde(rename = "quiz:start")]
    QuizStart,
}

/// Messages pushed to connected monitors.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutgoingMessage {
    /// Full participant record to upsert
    #[serde(rename = "user:update")]
    UserUpdate { user: ParticipantDto },

    /// Warning count change for one participant
    #[serde(rename = "user:warn", rename_all = "camelCase")]
    UserWarn { user_id: i64, amount: u32 },

    /// The event started
    #[serde(rename = "event:start")]
    EventStart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_user_warn_uses_camel_case_tag() {
        // テスト項目: user:warn の配信メッセージが userId 付きで直列化される
        // given (前提条件):
        let message = OutgoingMessage::UserWarn {
            user_id: 7,
            amount: 2,
        };

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"user:warn","userId":7,"amount":2}"#);
    }

    #[test]
    fn test_parse_quiz_start_from_monitor() {
        // テスト項目: モニタからの quiz:start メッセージがパースされる
        // given (前提条件):
        let json = r#"{ "type": "quiz:start" }"#;

        // when (操作):
        let message: IncomingMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(matches!(message, IncomingMessage::QuizStart));
    }
}
