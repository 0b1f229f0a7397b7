//! # Chat Data Transfer Objects
//!
//! Request and response structures for `POST /api/chat` and `GET /api/history`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat request body.
///
/// `message` is optional on the wire so that a body of `{}` reaches the handler
/// and is rejected with a client error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// Chat response carrying the generated reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub message: String,
}

/// One persisted exchange as returned by the history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}
