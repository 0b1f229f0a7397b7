//! Generation seam and the shared model slot.

use async_trait::async_trait;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Default cap on generated tokens for a chat reply.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 100;
/// Default sampling temperature for a chat reply.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sampling parameters passed with every generation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationOptions {
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generator not configured: {0}")]
    NotConfigured(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("a generator is already installed")]
    AlreadyInstalled,
}

/// Anything that turns a prompt into text.
///
/// Implementations must be safe to call from many requests at once.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;

    /// Human readable name used in logs.
    fn name(&self) -> &str;
}

/// Write-once holder for the process-wide generator.
///
/// Starts empty while the model loads. Once [`install`](ModelSlot::install)
/// succeeds every clone of the slot observes the same generator, and it is
/// never replaced.
#[derive(Clone, Default)]
pub struct ModelSlot {
    inner: Arc<OnceLock<Arc<dyn TextGenerator>>>,
}

impl ModelSlot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot that is ready from the start.
    pub fn ready(generator: Arc<dyn TextGenerator>) -> Self {
        let slot = Self::empty();
        // A fresh slot cannot already be filled.
        let _ = slot.inner.set(generator);
        slot
    }

    pub fn install(&self, generator: Arc<dyn TextGenerator>) -> Result<(), GenerationError> {
        self.inner
            .set(generator)
            .map_err(|_| GenerationError::AlreadyInstalled)
    }

    pub fn get(&self) -> Option<Arc<dyn TextGenerator>> {
        self.inner.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl std::fmt::Debug for ModelSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSlot")
            .field("generator", &self.inner.get().map(|g| g.name().to_string()))
            .finish()
    }
}
