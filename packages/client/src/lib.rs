//! Live classroom monitoring client library.
//!
//! This library implements the professor's "direct test" monitoring view for
//! the Terakoya platform: session-token validation, event loading over REST,
//! a real-time WebSocket channel and the in-memory roster state the live
//! view is derived from.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
