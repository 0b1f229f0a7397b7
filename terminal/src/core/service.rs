//! # Service Traits
//!
//! The UI talks to the backend only through [`ChatService`], so tests can swap
//! in a scripted implementation.

use super::error::ApiError;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Post one message to the chat endpoint and return the bot's reply.
    ///
    /// `token` is sent as a bearer token when present.
    async fn send_message(&self, message: &str, token: Option<&str>) -> Result<String, ApiError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;
}
