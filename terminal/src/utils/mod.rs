//! # Utility Functions
//!
//! - **[`runtime`]**: the background tokio runtime

pub mod runtime;
