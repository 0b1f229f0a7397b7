//! # Core
//!
//! Error type and the service seam between UI and HTTP client.

pub mod error;
pub mod service;

pub use error::{ApiError, Result};
pub use service::ChatService;
