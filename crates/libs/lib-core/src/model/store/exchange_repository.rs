//! # Exchange Repository
//!
//! Append-only storage of chat exchanges. Records are inserted once and never
//! updated; reads return a user's most recent exchanges first.

use super::models::Exchange;
use super::DbPool;
use lib_utils::now_utc;
use sqlx::query_as;

/// Exchange repository for database operations.
pub struct ExchangeRepository;

impl ExchangeRepository {
    /// Persist one exchange for `user_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Exchange)` - The stored record with its generated ID and timestamp
    /// * `Err(sqlx::Error)` - Database error occurred
    pub async fn create(
        pool: &DbPool,
        user_id: &str,
        user_message: &str,
        bot_response: &str,
    ) -> Result<Exchange, sqlx::Error> {
        let created_at = now_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO exchanges (user_id, user_message, bot_response, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#
        )
        .bind(user_id)
        .bind(user_message)
        .bind(bot_response)
        .bind(created_at)
        .execute(pool)
        .await?;

        Ok(Exchange {
            id: result.last_insert_rowid(),
            user_id: user_id.to_string(),
            user_message: user_message.to_string(),
            bot_response: bot_response.to_string(),
            created_at,
        })
    }

    /// Find the most recent exchanges for a user, newest first.
    pub async fn find_recent_by_user(
        pool: &DbPool,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Exchange>, sqlx::Error> {
        query_as::<_, Exchange>(
            "SELECT * FROM exchanges WHERE user_id = ? ORDER BY id DESC LIMIT ?"
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(pool)
        .await
    }

    /// Count stored exchanges for a user.
    pub async fn count_by_user(pool: &DbPool, user_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM exchanges WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::store::test_support::setup_test_db;

    #[tokio::test]
    async fn test_create_exchange() {
        let pool = setup_test_db().await;

        let exchange = ExchangeRepository::create(&pool, "1", "hello", "hi there")
            .await
            .unwrap();

        assert_eq!(exchange.user_id, "1");
        assert_eq!(exchange.user_message, "hello");
        assert_eq!(exchange.bot_response, "hi there");
        assert_eq!(ExchangeRepository::count_by_user(&pool, "1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_recent_exchanges_newest_first_and_scoped() {
        let pool = setup_test_db().await;

        for i in 0..5 {
            ExchangeRepository::create(&pool, "1", &format!("q{i}"), &format!("a{i}"))
                .await
                .unwrap();
        }
        ExchangeRepository::create(&pool, "2", "other", "user").await.unwrap();

        let recent = ExchangeRepository::find_recent_by_user(&pool, "1", 3).await.unwrap();

        let questions: Vec<&str> = recent.iter().map(|e| e.user_message.as_str()).collect();
        assert_eq!(questions, vec!["q4", "q3", "q2"]);
        assert!(recent.iter().all(|e| e.user_id == "1"));
    }

    #[tokio::test]
    async fn test_create_fails_without_schema() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        let result = ExchangeRepository::create(&pool, "1", "hello", "hi").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_migrations_index_exchanges_by_user() {
        let pool = setup_test_db().await;

        let (name,): (String,) = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'exchanges'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(name, "idx_exchanges_user_created");
    }
}
