//! # API Client
//!
//! HTTP client for the chat backend. Base URL, optional bearer token and
//! request timeout come from the environment:
//!
//! | var | default |
//! |---|---|
//! | `CHAT_API_URL` | `http://localhost:3001` |
//! | `CHAT_API_TOKEN` | none |
//! | `CHAT_API_TIMEOUT_SECS` | `60` |

use crate::core::{ApiError, ChatService};
use reqwest::Client;
use shared::ErrorResponse;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("CHAT_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = lookup("CHAT_API_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let timeout = lookup("CHAT_API_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            token,
            timeout: Duration::from_secs(timeout),
        }
    }
}

/// HTTP client for communicating with the chat backend.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Build the HTTP client with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into [`ApiError::Status`], keeping the server's
    /// `error` text when the body has one.
    pub(crate) async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "unexpected response".to_string());
        ApiError::Status { status, message }
    }
}

#[async_trait::async_trait]
impl ChatService for ApiClient {
    async fn send_message(&self, message: &str, token: Option<&str>) -> Result<String, ApiError> {
        super::chat::send_message(self, message, token).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        super::auth::login(self, username, password).await
    }
}
