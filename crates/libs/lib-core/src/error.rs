//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the backend crates. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - request issues, no side effects
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Unauthorized`](AppError::Unauthorized) → 401 (no bearer token)
//!    - [`Forbidden`](AppError::Forbidden) → 403 (bad or expired token)
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!    - [`TooManyRequests`](AppError::TooManyRequests) → 429
//!
//! 2. **Upstream Errors** - the generation model
//!    - [`ModelUnavailable`](AppError::ModelUnavailable) → 503 (still loading, retryable)
//!    - [`Generation`](AppError::Generation) → 500 with a generic message
//!
//! 3. **Server Errors** (5xx) - internal/system issues
//!    - [`Config`](AppError::Config), [`Database`](AppError::Database),
//!      [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_message(message: Option<&str>) -> Result<&str> {
//!     match message {
//!         Some(m) if !m.trim().is_empty() => Ok(m),
//!         _ => Err(AppError::InvalidInput("Message is required".to_string())),
//!     }
//! }
//! ```
//!
//! ## Response Body
//!
//! Every error renders as `{"error": <user message>, "code": <variant name>}`.
//! Server-side details are logged and never sent to the client.

use thiserror::Error;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input validation error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No credentials presented.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credentials presented but rejected (bad signature, malformed, expired).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client exceeded the request rate limit.
    #[error("Too many requests: {0}")]
    TooManyRequests(String),

    /// Generation model not loaded yet (or failed to load).
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Generation call failed.
    #[error("Generation error: {0}")]
    Generation(String),

    /// Database failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Generation(_)
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server-side failures, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::TooManyRequests(msg)
            | AppError::ModelUnavailable(msg) => msg.clone(),
            AppError::Generation(_) => "Failed to generate a response".to_string(),
            AppError::Config(_) | AppError::Database(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    /// Variant name, sent as the `code` field of the error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::NotFound(_) => "NotFound",
            AppError::TooManyRequests(_) => "TooManyRequests",
            AppError::ModelUnavailable(_) => "ModelUnavailable",
            AppError::Generation(_) => "Generation",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Full error message for server logs only
        if status.is_server_error() {
            tracing::error!(code = self.code(), "Server error: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) => AppError::Database(db_err.message().to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("Invalid JSON: {}", err))
    }
}
