//! Data Transfer Objects (DTOs) for the backend protocol.
//!
//! DTOs are organized by protocol:
//! - `http`: REST API payloads (camelCase on the wire)
//! - `websocket`: real-time channel messages, tagged by `type`

pub mod conversion;
pub mod http;
pub mod websocket;
