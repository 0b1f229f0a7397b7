//! # Text Generation
//!
//! The chat endpoint talks to the model through the [`TextGenerator`] trait.
//! The concrete client lives behind a [`ModelSlot`] that is filled once, in the
//! background, after the server starts listening.
//!
//! - **[`generator`]**: trait, options, errors and the write-once slot
//! - **[`provider`]**: provider selection from env and the `genai` client

pub mod generator;
pub mod provider;

pub use generator::{GenerationError, GenerationOptions, ModelSlot, TextGenerator};
pub use provider::{load_generator, AiProvider, GenerationConfig};
