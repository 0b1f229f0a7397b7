//! # Account Handler Tests

mod register;

use crate::chat::ModelSlot;
use crate::test_support::{send_json, setup_test_db, test_app};
use axum::http::StatusCode;
use axum::Router;
use lib_core::DbPool;

fn app(pool: &DbPool) -> Router {
    test_app(pool.clone(), ModelSlot::empty())
}

async fn register_user(pool: &DbPool, username: &str, password: &str) -> StatusCode {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": password,
    });
    let (status, _) = send_json(app(pool), "POST", "/api/register", &body.to_string(), None).await;
    status
}
