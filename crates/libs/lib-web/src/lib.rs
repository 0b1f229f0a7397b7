//! # Web Library
//!
//! HTTP handlers, middleware, the text generation seam, and server setup.

pub mod chat;
pub mod handlers;
pub mod middleware;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::{create_router, start_server, AppState, ServerConfig};
