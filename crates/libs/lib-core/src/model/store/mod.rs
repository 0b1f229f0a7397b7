//! # Database Store
//!
//! Database connection pool and repository implementations.
//!
//! The pool is created once at startup and shared by cloning; `SqlitePool` is
//! internally reference counted and safe for concurrent use.

// region: --- Modules
pub mod exchange_repository;
pub mod models;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use exchange_repository::ExchangeRepository;
pub use models::{Exchange, User};
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool for `database_url`.
///
/// The database file is created if it does not exist yet.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions
