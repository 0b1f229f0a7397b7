//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the chat client (terminal) and the backend API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::chat`]**: Chat exchange and history DTOs
//!   - **[`dto::auth`]**: Registration, login and error DTOs
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case** in Rust, which maps to **snake_case** in JSON by default
//! - All structs implement both `Serialize` and `Deserialize` for bidirectional communication
//!
//! ## Usage in Backend
//!
//! ```rust,ignore
//! use shared::dto::chat::{ChatRequest, ChatResponse};
//! use axum::Json;
//!
//! async fn chat(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
//!     # todo!()
//! }
//! ```
//!
//! ## Usage in Frontend
//!
//! ```rust,ignore
//! use shared::dto::chat::{ChatRequest, ChatResponse};
//!
//! let response: ChatResponse = reqwest::Client::new()
//!     .post("http://localhost:3001/api/chat")
//!     .json(&ChatRequest::new("Hello there"))
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//!
//! println!("{}", response.message);
//! ```

pub mod dto;

// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
