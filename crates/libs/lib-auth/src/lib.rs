//! # Authentication Library
//!
//! Password hashing and bearer token issuing/verification.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{Claims, TokenError, encode_jwt, decode_jwt};
