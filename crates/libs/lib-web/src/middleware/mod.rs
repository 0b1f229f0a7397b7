//! # Middleware
//!
//! Axum middleware for authentication, rate limiting, request stamping and
//! request logging.

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_rate_limit;
pub mod mw_req_stamp;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::{attach_identity, authenticate, require_auth};
pub use mw_logging::log_requests;
pub use mw_rate_limit::{rate_limit, RateLimiter};
pub use mw_req_stamp::{stamp_req, RequestStamp};
// endregion: --- Re-exports
