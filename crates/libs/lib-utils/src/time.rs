//! # Time Utilities
//!
//! Utilities for time handling using chrono.

use chrono::{DateTime, Duration, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current UTC time shifted forward by `minutes`.
pub fn now_utc_plus_minutes(minutes: i64) -> DateTime<Utc> {
    now_utc() + Duration::minutes(minutes)
}
