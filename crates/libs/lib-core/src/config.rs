//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The configuration is built once in `start_server` and handed to the router as
//! state; handlers and middleware receive it through `State<Config>`.

use crate::error::{AppError, Result};
use lib_utils::{get_env, get_env_or, get_env_parse_or};

/// Default rate limit: requests allowed per client per window.
pub const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;

/// Default rate limit window (15 minutes).
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// JWT token validity period in minutes
    ///
    /// Valid range: 1-43200 minutes (1 minute to 30 days)
    pub jwt_expiration_minutes: i64,

    /// Requests allowed per client IP within one rate limit window
    pub rate_limit_max_requests: u32,

    /// Rate limit window length in seconds
    pub rate_limit_window_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/chatbot.db");

        let jwt_secret = get_env("JWT_SECRET").map_err(|e| AppError::Config(e.to_string()))?;

        let jwt_expiration_minutes = get_env_parse_or("JWT_EXPIRATION_MINUTES", 30)
            .map_err(|e| AppError::Config(e.to_string()))?;

        let rate_limit_max_requests =
            get_env_parse_or("RATE_LIMIT_MAX_REQUESTS", DEFAULT_RATE_LIMIT_MAX_REQUESTS)
                .map_err(|e| AppError::Config(e.to_string()))?;

        let rate_limit_window_secs =
            get_env_parse_or("RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS)
                .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_minutes,
            rate_limit_max_requests,
            rate_limit_window_secs,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(AppError::Config("JWT_SECRET must be at least 32 characters long".to_string()));
        }

        if self.jwt_expiration_minutes < 1 || self.jwt_expiration_minutes > 43_200 {
            return Err(AppError::Config("JWT_EXPIRATION_MINUTES must be between 1 and 43200 (30 days)".to_string()));
        }

        if self.rate_limit_max_requests == 0 {
            return Err(AppError::Config("RATE_LIMIT_MAX_REQUESTS must be greater than 0".to_string()));
        }

        if self.rate_limit_window_secs == 0 {
            return Err(AppError::Config("RATE_LIMIT_WINDOW_SECS must be greater than 0".to_string()));
        }

        Ok(())
    }
}
