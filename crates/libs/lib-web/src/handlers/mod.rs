//! # HTTP Handlers
//!
//! - **[`chat`]**: `POST /api/chat`
//! - **[`auth`]**: `POST /api/register`, `POST /api/login`
//! - **[`history`]**: `GET /api/history`

pub mod auth;
pub mod chat;
pub mod history;
