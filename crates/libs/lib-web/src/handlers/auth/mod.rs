//! # Account Handlers
//!
//! Registration and login. A successful login yields a bearer token that the
//! chat client sends back as `Authorization: Bearer <token>`.
//!
//! ```rust,ignore
//! use axum::{routing::post, Router};
//! use lib_web::handlers::auth::{login, register};
//!
//! let app = Router::new()
//!     .route("/api/register", post(register))
//!     .route("/api/login", post(login));
//! ```

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_auth::{encode_jwt, hash_password, verify_password};
use lib_core::model::store::UserRepository;
use lib_core::{Config, DbPool};
use lib_utils::{validate_email, validate_min_length};
use shared::{ErrorResponse, LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use tracing::{debug, error, info, instrument, warn};

type Rejection = (StatusCode, Json<ErrorResponse>);

const MIN_USERNAME_LEN: usize = 3;
const BAD_CREDENTIALS: &str = "Incorrect username or password";

fn reject(status: StatusCode, code: &str, error: impl Into<String>) -> Rejection {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: Some(code.to_string()),
        }),
    )
}

fn bad_request(error: impl Into<String>) -> Rejection {
    reject(StatusCode::BAD_REQUEST, "InvalidInput", error)
}

fn internal() -> Rejection {
    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal",
        "An internal error occurred",
    )
}

/// Register handler - creates a new user account.
///
/// # Validation
///
/// - Username must be at least 3 characters and not taken
/// - Email must look like an address
/// - Password must be at least 8 characters (validated in `hash_password`)
///
/// Answers `201 {"message": "User created successfully"}`.
#[instrument(skip_all)]
pub async fn register(
    State(pool): State<DbPool>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), Rejection> {
    let Json(req) = payload.map_err(|e| bad_request(e.body_text()))?;
    info!(username = %req.username, "[REGISTER] New registration request");

    validate_min_length(&req.username, MIN_USERNAME_LEN, "Username").map_err(|e| {
        warn!("[REGISTER] {}", e);
        bad_request(e)
    })?;
    validate_email(&req.email).map_err(|e| {
        warn!("[REGISTER] {}", e);
        bad_request(e)
    })?;

    match UserRepository::find_by_username(&pool, &req.username).await {
        Ok(Some(_)) => {
            warn!("[REGISTER] Username already registered: {}", req.username);
            return Err(bad_request("Username already registered"));
        }
        Ok(None) => {}
        Err(e) => {
            error!("[REGISTER] Database error checking username: {}", e);
            return Err(internal());
        }
    }

    debug!("[REGISTER] Hashing password...");
    let password_hash = hash_password(&req.password).map_err(|e| {
        warn!("[REGISTER] Password rejected: {}", e);
        bad_request(e)
    })?;

    let user = UserRepository::create(&pool, &req.username, &req.email, &password_hash)
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent registration of the same name
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                bad_request("Username already registered")
            }
            e => {
                error!("[REGISTER] Failed to create user: {}", e);
                internal()
            }
        })?;

    info!(user_id = user.id, username = %user.username, "[REGISTER] User created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully".to_string(),
        }),
    ))
}

/// Login handler - exchanges username and password for a bearer token.
///
/// Unknown users and wrong passwords get the same `401` so the response does
/// not reveal which usernames exist.
#[instrument(skip_all)]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, Rejection> {
    let Json(req) = payload.map_err(|e| bad_request(e.body_text()))?;
    info!(username = %req.username, "[LOGIN] Login attempt");

    let user = match UserRepository::find_by_username(&pool, &req.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("[LOGIN] User not found: {}", req.username);
            return Err(reject(StatusCode::UNAUTHORIZED, "Unauthorized", BAD_CREDENTIALS));
        }
        Err(e) => {
            error!("[LOGIN] Database error: {}", e);
            return Err(internal());
        }
    };

    debug!("[LOGIN] Verifying password...");
    let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
        error!("[LOGIN] Password verification error: {}", e);
        internal()
    })?;

    if !is_valid {
        warn!("[LOGIN] Invalid password for user: {}", user.username);
        return Err(reject(StatusCode::UNAUTHORIZED, "Unauthorized", BAD_CREDENTIALS));
    }

    let token = encode_jwt(
        user.id,
        user.username.clone(),
        &config.jwt_secret,
        config.jwt_expiration_minutes,
    )
    .map_err(|e| {
        error!("[LOGIN] JWT encoding failed: {}", e);
        internal()
    })?;

    info!(user_id = user.id, username = %user.username, "[LOGIN] User authenticated");

    Ok(Json(TokenResponse::bearer(token)))
}

#[cfg(test)]
mod tests;
