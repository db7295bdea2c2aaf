//! Real-time channel messages.
//!
//! Every message is a JSON object tagged by `type`, using the event names
//! of the platform protocol (`user:join`, `user:update`, `user:warn`,
//! `event:start`, `quiz:start`).

use serde::{Deserialize, Serialize};

use super::http::ParticipantDto;

/// Messages received from the channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum IncomingMessage {
    /// Full participant record to upsert
    #[serde(rename = "user:update")]
    UserUpdate { user: ParticipantDto },

    /// Warning count change for one participant
    #[serde(rename = "user:warn", rename_all = "camelCase")]
    UserWarn { user_id: i64, amount: u32 },

    /// The event started
    #[serde(rename = "event:start")]
    EventStart,

    /// Quiz launch signal (relevant to student clients, ignored here)
    #[serde(rename = "quiz:start")]
    QuizStart,

    /// Another monitor joined (ignored here)
    #[serde(rename = "user:join")]
    UserJoin,
}

/// Messages emitted on the channel.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum OutgoingMessage {
    /// Join the channel scope of the current event
    #[serde(rename = "user:join")]
    UserJoin,

    /// Launch the test (professor command)
    #[serde(rename = "quiz:start")]
    QuizStart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_update_message() {
        // テスト項目: user:update メッセージが参加者ペイロード付きでパースされる
        // given (前提条件):
        let json = r#"{
            "type": "user:update",
            "user": {
                "id": 1,
                "username": "alice",
                "lastName": "Martin",
                "state": { "slug": "actif", "name": "Actif" },
                "eventWarns": []
            }
        }"#;

        // when (操作):
        let message: IncomingMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match message {
            IncomingMessage::UserUpdate { user } => {
                assert_eq!(user.id, 1);
                assert_eq!(user.last_name, "Martin");
                assert_eq!(user.state.unwrap().slug, "actif");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_user_warn_message() {
        // テスト項目: user:warn メッセージが userId と amount 付きでパースされる
        // given (前提条件):
        let json = r#"{ "type": "user:warn", "userId": 7, "amount": 2 }"#;

        // when (操作):
        let message: IncomingMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match message {
            IncomingMessage::UserWarn { user_id, amount } => {
                assert_eq!(user_id, 7);
                assert_eq!(amount, 2);
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_parse_event_start_message() {
        // テスト項目: ペイロードの無い event:start メッセージがパースされる
        // given (前提条件):
        let json = r#"{ "type": "event:start" }"#;

        // when (操作):
        let message: IncomingMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(matches!(message, IncomingMessage::EventStart));
    }

    #[test]
    fn test_parse_unknown_type_is_an_error() {
        // テスト項目: 未知の type はパースエラーになる（無視はトランスポート層の責務）
        // given (前提条件):
        let json = r#"{ "type": "room:close" }"#;

        // when (操作):
        let result = serde_json::from_str::<IncomingMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_outgoing_join() {
        // テスト項目: user:join の送信メッセージが type タグ付きで直列化される
        // given (前提条件):
        let message = OutgoingMessage::UserJoin;

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"user:join"}"#);
    }

    #[test]
    fn test_serialize_outgoing_quiz_start() {
        // テスト項目: quiz:start の送信メッセージが type タグ付きで直列化される
        // given (前提条件):
        let message = OutgoingMessage::QuizStart;

        // when (操作):
        let json = serde_json::to_string(&message).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"quiz:start"}"#);
    }
}
