//! Shared fixtures for handler tests: an in-memory database built from the
//! backend migrations, a fixed config, scripted generators and request helpers.

use crate::chat::{GenerationError, GenerationOptions, ModelSlot, TextGenerator};
use crate::server::{create_router, AppState};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lib_core::{Config, DbPool};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// In-memory database migrated with `backend/migrations`.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../../../backend/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_minutes: 30,
        rate_limit_max_requests: 100,
        rate_limit_window_secs: 900,
    }
}

/// Replies with a fixed text and counts calls.
pub struct ScriptedGenerator {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(reason.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(GenerationError::Provider)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn test_state(pool: DbPool, model: ModelSlot) -> AppState {
    AppState::new(pool, test_config(), model)
}

pub fn test_app(pool: DbPool, model: ModelSlot) -> Router {
    create_router(test_state(pool, model))
}

/// Send a JSON body, optionally with a bearer token; returns status and parsed body.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    send(app, request).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Wait for detached work (exchange persistence) to land.
pub async fn wait_for_exchanges(pool: &DbPool, user_id: &str, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..50 {
        count = lib_core::model::store::ExchangeRepository::count_by_user(pool, user_id)
            .await
            .unwrap_or(0);
        if count >= expected {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    count
}
