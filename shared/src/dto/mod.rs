//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the chat client and backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`chat`] - Chat message exchange and conversation history
//! - [`auth`] - Registration, login, and error responses
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/chat
//! Content-Type: application/json
//!
//! { "message": "Tell me a story" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "message": "Once upon a time..." }
//! ```

pub mod auth;
pub mod chat;

pub use auth::*;
pub use chat::*;
