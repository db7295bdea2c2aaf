//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    ChannelEvent, ConnectionState, Event, Group, Participant, Quiz, Warning,
};
use crate::infrastructure::dto::{http as dto, websocket::IncomingMessage};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::StateDto> for ConnectionState {
    fn from(dto: dto::StateDto) -> Self {
        Self {
            slug: dto.slug,
            name: dto.name,
        }
    }
}

impl From<dto::WarnDto> for Warning {
    fn from(dto: dto::WarnDto) -> Self {
        Self { amount: dto.amount }
    }
}

impl From<dto::ParticipantDto> for Participant {
    fn from(dto: dto::ParticipantDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            last_name: dto.last_name,
            connection_state: dto.state.map(Into::into),
            warnings: dto.event_warns.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<dto::QuizDto> for Quiz {
    fn from(dto: dto::QuizDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            slug: dto.slug,
            strict: dto.strict,
            shuffle: dto.shuffle,
        }
    }
}

impl From<dto::EventDto> for Event {
    fn from(dto: dto::EventDto) -> Self {
        Self {
            start: dto.start,
            started: dto.started,
            started_at: dto.started_at,
            in_future: dto.in_future,
            quiz: dto.quiz.map(Into::into),
            users: dto
                .users
                .map(|users| users.into_iter().map(Into::into).collect()),
        }
    }
}

impl From<dto::GroupDto> for Group {
    fn from(dto: dto::GroupDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

// ========================================
// Wire message → Channel event
// ========================================

/// Convert a parsed channel message into its typed event.
///
/// Messages that are not relevant to the monitoring view (`user:join`,
/// `quiz:start` echoes) yield `None` and are dropped by the transport.
pub fn channel_event_from(message: IncomingMessage) -> Option<ChannelEvent> {
    match message {
        IncomingMessage::UserUpdate { user } => Some(ChannelEvent::UserUpdate(user.into())),
        IncomingMessage::UserWarn { user_id, amount } => {
            Some(ChannelEvent::UserWarn { user_id, amount })
        }
        IncomingMessage::EventStart => Some(ChannelEvent::EventStart),
        IncomingMessage::QuizStart | IncomingMessage::UserJoin => None,
    }
}
