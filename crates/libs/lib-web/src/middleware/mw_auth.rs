//! # Authentication Middleware
//!
//! Axum middleware for bearer token validation.
//!
//! Both guards share [`authenticate`]; they differ only in what they do when
//! it fails:
//!
//! - [`require_auth`] rejects: no token → `401`, bad or expired token → `403`.
//! - [`attach_identity`] never rejects: a valid token attaches [`Claims`], anything
//!   else lets the request through anonymously.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware::from_fn_with_state, routing::get, Router};
//! use lib_web::middleware::require_auth;
//!
//! let app = Router::new()
//!     .route("/api/history", get(handler))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers can then extract claims using `Extension<Claims>`:
//!
//! ```rust,ignore
//! use axum::extract::Extension;
//! use lib_auth::Claims;
//!
//! async fn handler(Extension(claims): Extension<Claims>) -> String {
//!     format!("Hello, user {}!", claims.username)
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use lib_auth::{decode_jwt, Claims};
use lib_core::{AppError, Config};
use tracing::{debug, warn};

/// Verify the `Authorization: Bearer <token>` header against `secret`.
///
/// Missing header, a non-bearer scheme, or an empty token is
/// [`AppError::Unauthorized`]. A token that fails verification for any reason
/// (signature, format, expiry) is [`AppError::Forbidden`].
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Claims, AppError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    decode_jwt(token, secret).map_err(|e| {
        debug!("[AUTH] JWT validation failed: {}", e);
        AppError::Forbidden("Invalid or expired token".to_string())
    })
}

/// Authentication middleware that rejects unauthenticated requests.
///
/// - **Valid token**: continues with `Claims` in extensions
/// - **No token**: `401 Unauthorized`
/// - **Invalid/expired token**: `403 Forbidden`
pub async fn require_auth(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(req.headers(), &config.jwt_secret).inspect_err(|e| {
        warn!(path = %req.uri().path(), "[AUTH] Rejected: {}", e);
    })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", claims.username, claims.sub);
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Lenient variant: attaches `Claims` when a valid token is present and
/// otherwise continues anonymously.
pub async fn attach_identity(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(req.headers(), &config.jwt_secret) {
        Ok(claims) => {
            debug!("[AUTH] Identified user: {} (id: {})", claims.username, claims.sub);
            req.extensions_mut().insert(claims);
        }
        Err(AppError::Unauthorized(_)) => {}
        Err(e) => warn!("[AUTH] Ignoring unusable token, continuing anonymously: {}", e),
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use lib_auth::encode_jwt;

    const SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = authenticate(&HeaderMap::new(), SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_scheme_is_unauthorized() {
        let err = authenticate(&headers_with("Basic dXNlcjpwYXNz"), SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = authenticate(&headers_with("Bearer "), SECRET).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_malformed_token_is_forbidden() {
        let err = authenticate(&headers_with("Bearer not.a.jwt"), SECRET).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_expired_token_is_forbidden() {
        let token = encode_jwt(1, "alice".to_string(), SECRET, -10).unwrap();
        let err = authenticate(&headers_with(&format!("Bearer {token}")), SECRET).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_valid_token_yields_claims() {
        let token = encode_jwt(7, "alice".to_string(), SECRET, 30).unwrap();
        let claims = authenticate(&headers_with(&format!("Bearer {token}")), SECRET).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "alice");
    }
}
