//! Shared utilities for the Terakoya workspace.
//!
//! This crate provides logging setup and time utilities used by both the
//! monitoring client and the development server.

pub mod logger;
pub mod time;
