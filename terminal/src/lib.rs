//! # Chat Terminal
//!
//! Desktop chat client for the chat backend, built on egui/eframe.
//!
//! - **[`app`]**: conversation state and the background send/login tasks
//! - **[`core`]**: error type and the [`ChatService`](core::ChatService) seam
//! - **[`services`]**: `reqwest` client for the backend API
//! - **[`ui`]**: egui rendering
//! - **[`utils`]**: the background tokio runtime

pub mod app;
pub mod core;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, ChatState, Message, Sender};
pub use core::{ApiError, ChatService, Result};
