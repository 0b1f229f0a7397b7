use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// One user message / bot response pair. Append-only.
///
/// `user_id` is the `sub` claim of the bearer token that was attached to the
/// chat request.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    pub id: i64,
    pub user_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub created_at: DateTime<Utc>,
}
