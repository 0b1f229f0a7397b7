//! # Chat Handler
//!
//! `POST /api/chat` forwards one message to the generation model and returns
//! its reply. When the caller is identified (see
//! [`attach_identity`](crate::middleware::attach_identity)) the exchange is
//! stored on a detached task; storage never delays or changes the response.

use crate::chat::{GenerationOptions, ModelSlot};
use axum::extract::{rejection::JsonRejection, Extension, Json, State};
use lib_auth::Claims;
use lib_core::model::store::ExchangeRepository;
use lib_core::{AppError, DbPool};
use lib_utils::validate_not_empty;
use shared::{ChatRequest, ChatResponse};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

#[instrument(skip_all)]
pub async fn chat(
    State(model): State<ModelSlot>,
    State(pool): State<DbPool>,
    claims: Option<Extension<Claims>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(req) = payload.map_err(|e| {
        debug!("[CHAT] Rejected body: {}", e);
        AppError::InvalidInput("Message is required".to_string())
    })?;

    let message = req
        .message
        .ok_or_else(|| AppError::InvalidInput("Message is required".to_string()))?;
    validate_not_empty(&message, "Message").map_err(AppError::InvalidInput)?;

    let generator = model.get().ok_or_else(|| {
        warn!("[CHAT] Model not loaded yet");
        AppError::ModelUnavailable("Model not loaded".to_string())
    })?;

    info!(generator = generator.name(), chars = message.chars().count(), "[CHAT] Generating reply");
    let reply = generator
        .generate(&message, &GenerationOptions::default())
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;

    if reply.trim().is_empty() {
        return Err(AppError::Generation("empty generation".to_string()));
    }

    if let Some(Extension(claims)) = claims {
        spawn_persist(pool, claims.sub, message, reply.clone());
    }

    Ok(Json(ChatResponse { message: reply }))
}

/// Store an exchange in the background. Failures are logged only.
pub fn spawn_persist(
    pool: DbPool,
    user_id: String,
    user_message: String,
    bot_response: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match ExchangeRepository::create(&pool, &user_id, &user_message, &bot_response).await {
            Ok(exchange) => debug!(id = exchange.id, user_id = %user_id, "[CHAT] Exchange stored"),
            Err(e) => error!(user_id = %user_id, "[CHAT] Failed to store exchange: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use crate::chat::ModelSlot;
    use crate::test_support::{
        send_json, setup_test_db, test_app, wait_for_exchanges, ScriptedGenerator, TEST_SECRET,
    };
    use axum::http::StatusCode;
    use lib_auth::encode_jwt;
    use lib_core::model::store::ExchangeRepository;
    use sqlx::sqlite::SqlitePoolOptions;

    fn token_for(user_id: i64) -> String {
        encode_jwt(user_id, "alice".to_string(), TEST_SECRET, 30).unwrap()
    }

    #[tokio::test]
    async fn test_missing_message_is_400() {
        let pool = setup_test_db().await;
        let generator = ScriptedGenerator::replying("hi there");
        let app = test_app(pool, ModelSlot::ready(generator.clone()));

        let (status, body) = send_json(app, "POST", "/api/chat", "{}", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_message_is_400() {
        let pool = setup_test_db().await;
        let generator = ScriptedGenerator::replying("hi there");
        let app = test_app(pool, ModelSlot::ready(generator.clone()));

        let (status, _) =
            send_json(app, "POST", "/api/chat", r#"{"message": "   \n"}"#, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_object_body_is_400() {
        let pool = setup_test_db().await;
        let app = test_app(pool, ModelSlot::ready(ScriptedGenerator::replying("x")));

        let (status, _) = send_json(app, "POST", "/api/chat", "not json", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_model_not_loaded_is_503() {
        let pool = setup_test_db().await;
        let app = test_app(pool, ModelSlot::empty());

        let (status, body) =
            send_json(app, "POST", "/api/chat", r#"{"message": "hi"}"#, None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "ModelUnavailable");
    }

    #[tokio::test]
    async fn test_reply_is_returned() {
        let pool = setup_test_db().await;
        let generator = ScriptedGenerator::replying("Hello! How can I help?");
        let app = test_app(pool, ModelSlot::ready(generator.clone()));

        let (status, body) =
            send_json(app, "POST", "/api/chat", r#"{"message": "hi"}"#, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello! How can I help?");
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generation_failure_is_500_with_generic_message() {
        let pool = setup_test_db().await;
        let app = test_app(pool.clone(), ModelSlot::ready(ScriptedGenerator::failing("401 bad key")));
        let token = token_for(1);

        let (status, body) =
            send_json(app, "POST", "/api/chat", r#"{"message": "hi"}"#, Some(&token)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to generate a response");
        assert_eq!(ExchangeRepository::count_by_user(&pool, "1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_generation_is_500() {
        let pool = setup_test_db().await;
        let app = test_app(pool, ModelSlot::ready(ScriptedGenerator::replying("  ")));

        let (status, _) =
            send_json(app, "POST", "/api/chat", r#"{"message": "hi"}"#, None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_authenticated_chat_stores_one_exchange() {
        let pool = setup_test_db().await;
        let app = test_app(pool.clone(), ModelSlot::ready(ScriptedGenerator::replying("pong")));
        let token = token_for(42);

        let (status, _) =
            send_json(app, "POST", "/api/chat", r#"{"message": "ping"}"#, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);

        assert_eq!(wait_for_exchanges(&pool, "42", 1).await, 1);
        let stored = ExchangeRepository::find_recent_by_user(&pool, "42", 10)
            .await
            .unwrap();
        assert_eq!(stored[0].user_message, "ping");
        assert_eq!(stored[0].bot_response, "pong");
    }

    #[tokio::test]
    async fn test_anonymous_chat_stores_nothing() {
        let pool = setup_test_db().await;
        let app = test_app(pool.clone(), ModelSlot::ready(ScriptedGenerator::replying("pong")));

        let (status, _) =
            send_json(app, "POST", "/api/chat", r#"{"message": "ping"}"#, None).await;
        assert_eq!(status, StatusCode::OK);

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exchanges")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_invalid_token_still_chats_anonymously() {
        let pool = setup_test_db().await;
        let app = test_app(pool, ModelSlot::ready(ScriptedGenerator::replying("pong")));

        let (status, body) = send_json(
            app,
            "POST",
            "/api/chat",
            r#"{"message": "ping"}"#,
            Some("garbage.token.value"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
    }

    #[tokio::test]
    async fn test_storage_failure_does_not_affect_reply() {
        // No schema: every insert fails.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let app = test_app(pool, ModelSlot::ready(ScriptedGenerator::replying("pong")));
        let token = token_for(7);

        let (status, body) =
            send_json(app, "POST", "/api/chat", r#"{"message": "ping"}"#, Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
    }
}
