//! # Backend API
//!
//! - **[`client`]**: `ApiClient` and its environment config
//! - **[`chat`]**: `POST /api/chat`
//! - **[`auth`]**: `POST /api/login`

pub mod auth;
pub mod chat;
pub mod client;

pub use client::{ApiClient, ClientConfig};
