//! # User Repository
//!
//! Provides database access layer for user accounts.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{UserRepository, create_pool};
//! # async fn example() -> anyhow::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//!
//! let user = UserRepository::create(&pool, "alice", "alice@example.com", "hashed_password").await?;
//!
//! let found = UserRepository::find_by_username(&pool, "alice").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::User;
use super::DbPool;
use lib_utils::now_utc;
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their username.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching username
    /// * `Ok(None)` - No user found with that username
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn find_by_username(pool: &DbPool, username: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user in the database.
    ///
    /// `password_hash` must already be hashed (see `lib_auth::hash_password`).
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the username already exists (UNIQUE constraint
    /// violation) or the database connection fails.
    pub async fn create(
        pool: &DbPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)"
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(now_utc())
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::test_support::setup_test_db;

    #[tokio::test]
    async fn test_create_and_find_user() {
        let pool = setup_test_db().await;

        let user = UserRepository::create(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");

        let found = UserRepository::find_by_username(&pool, "alice")
            .await
            .unwrap()
            .expect("user should exist");
        assert_eq!(found.id, user.id);
        assert_eq!(found.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_find_unknown_user() {
        let pool = setup_test_db().await;
        let found = UserRepository::find_by_username(&pool, "nobody").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_fails() {
        let pool = setup_test_db().await;
        UserRepository::create(&pool, "alice", "a@example.com", "hash").await.unwrap();

        let result = UserRepository::create(&pool, "alice", "b@example.com", "hash").await;
        assert!(result.is_err());
    }
}
