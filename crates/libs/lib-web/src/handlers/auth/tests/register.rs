//! # Register Tests

use super::*;
use lib_core::model::store::UserRepository;

#[tokio::test]
async fn test_register_success() {
    let pool = setup_test_db().await;

    let body = r#"{"username": "alice", "email": "alice@example.com", "password": "SecurePass123"}"#;
    let (status, json) = send_json(app(&pool), "POST", "/api/register", body, None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "User created successfully");

    let user = UserRepository::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .expect("user stored");
    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, "SecurePass123");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let pool = setup_test_db().await;
    assert_eq!(register_user(&pool, "alice", "SecurePass123").await, StatusCode::CREATED);

    let body = r#"{"username": "alice", "email": "other@example.com", "password": "SecurePass123"}"#;
    let (status, json) = send_json(app(&pool), "POST", "/api/register", body, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Username already registered");
}

#[tokio::test]
async fn test_register_short_username() {
    let pool = setup_test_db().await;

    let body = r#"{"username": "al", "email": "al@example.com", "password": "SecurePass123"}"#;
    let (status, json) = send_json(app(&pool), "POST", "/api/register", body, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Username must be at least 3 characters");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let pool = setup_test_db().await;

    let body = r#"{"username": "alice", "email": "not-an-email", "password": "SecurePass123"}"#;
    let (status, _) = send_json(app(&pool), "POST", "/api/register", body, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_weak_password() {
    let pool = setup_test_db().await;

    let body = r#"{"username": "alice", "email": "alice@example.com", "password": "short"}"#;
    let (status, json) = send_json(app(&pool), "POST", "/api/register", body, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Password must be at least 8 characters");
    assert!(UserRepository::find_by_username(&pool, "alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let pool = setup_test_db().await;

    let (status, _) =
        send_json(app(&pool), "POST", "/api/register", r#"{"username": "alice"}"#, None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
