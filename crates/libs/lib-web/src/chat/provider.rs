//! # Generation Provider
//!
//! Picks the LLM provider and model from the environment and builds the
//! `genai`-backed [`TextGenerator`]. `genai` routes the request to the right
//! adapter based on the model name, so the provider mainly decides which API
//! key to read and which model to default to.
//!
//! | var | default |
//! |---|---|
//! | `GENERATION_PROVIDER` | `openai` |
//! | `GENERATION_MODEL` | provider default |
//! | `GENERATION_SYSTEM_PROMPT` | none |

use super::generator::{GenerationError, TextGenerator};
use lib_utils::{get_env_or, validate_not_empty};
use std::str::FromStr;
use std::sync::Arc;

/// AI Provider type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AiProvider {
    #[default]
    OpenAI,
    Anthropic,
    Gemini,
    DeepSeek,
    /// Local models, no API key.
    Ollama,
}

impl AiProvider {
    /// Get the default model name for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            AiProvider::OpenAI => "gpt-4o-mini",
            AiProvider::Anthropic => "claude-3-haiku-20240307",
            AiProvider::Gemini => "gemini-2.0-flash",
            AiProvider::DeepSeek => "deepseek-chat",
            AiProvider::Ollama => "llama3.2",
        }
    }

    /// Environment variable holding the API key, if the provider needs one.
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            AiProvider::OpenAI => Some("OPENAI_API_KEY"),
            AiProvider::Anthropic => Some("ANTHROPIC_API_KEY"),
            AiProvider::Gemini => Some("GEMINI_API_KEY"),
            AiProvider::DeepSeek => Some("DEEPSEEK_API_KEY"),
            AiProvider::Ollama => None,
        }
    }
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAI),
            "anthropic" => Ok(AiProvider::Anthropic),
            "gemini" => Ok(AiProvider::Gemini),
            "deepseek" => Ok(AiProvider::DeepSeek),
            "ollama" => Ok(AiProvider::Ollama),
            other => Err(format!("Unknown generation provider: {other}")),
        }
    }
}

/// Generation client configuration
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub provider: AiProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub system_prompt: Option<String>,
}

impl GenerationConfig {
    pub fn from_env() -> Result<Self, String> {
        let provider: AiProvider = get_env_or("GENERATION_PROVIDER", "openai").parse()?;

        let model = std::env::var("GENERATION_MODEL")
            .ok()
            .filter(|m| validate_not_empty(m, "GENERATION_MODEL").is_ok())
            .unwrap_or_else(|| provider.default_model().to_string());

        let api_key = provider
            .api_key_env()
            .and_then(|name| std::env::var(name).ok())
            .filter(|key| !key.trim().is_empty());

        let system_prompt = std::env::var("GENERATION_SYSTEM_PROMPT")
            .ok()
            .filter(|p| !p.trim().is_empty());

        Ok(Self {
            provider,
            model,
            api_key,
            system_prompt,
        })
    }

    /// Fails when the provider needs an API key and none was found.
    pub fn check_credentials(&self) -> Result<(), GenerationError> {
        match (self.provider.api_key_env(), &self.api_key) {
            (Some(var), None) => Err(GenerationError::NotConfigured(format!(
                "{var} is not set"
            ))),
            _ => Ok(()),
        }
    }
}

/// Build the process-wide generator.
///
/// Called from the background loader; the result is installed into the
/// [`ModelSlot`](super::ModelSlot).
pub fn load_generator(config: &GenerationConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    config.check_credentials()?;
    build(config)
}

#[cfg(feature = "genai")]
fn build(config: &GenerationConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    Ok(Arc::new(genai_client::GenaiGenerator::new(config)))
}

/// Fallback when genai feature is not enabled
#[cfg(not(feature = "genai"))]
fn build(_config: &GenerationConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    Err(GenerationError::NotConfigured(
        "text generation is not enabled. Please enable the 'genai' feature.".to_string(),
    ))
}

#[cfg(feature = "genai")]
mod genai_client {
    use super::GenerationConfig;
    use crate::chat::generator::{GenerationError, GenerationOptions, TextGenerator};
    use async_trait::async_trait;
    use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
    use genai::resolver::{AuthData, AuthResolver};
    use genai::Client;

    pub struct GenaiGenerator {
        client: Client,
        model: String,
        system_prompt: Option<String>,
    }

    impl GenaiGenerator {
        pub fn new(config: &GenerationConfig) -> Self {
            let client = match config.api_key.clone() {
                Some(api_key) => {
                    let auth_resolver = AuthResolver::from_resolver_fn(
                        move |_model_iden| -> Result<Option<AuthData>, genai::resolver::Error> {
                            Ok(Some(AuthData::from_single(api_key.clone())))
                        },
                    );
                    Client::builder().with_auth_resolver(auth_resolver).build()
                }
                None => Client::default(),
            };

            Self {
                client,
                model: config.model.clone(),
                system_prompt: config.system_prompt.clone(),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for GenaiGenerator {
        async fn generate(
            &self,
            prompt: &str,
            options: &GenerationOptions,
        ) -> Result<String, GenerationError> {
            let mut chat_req = ChatRequest::default();
            if let Some(system_prompt) = &self.system_prompt {
                chat_req = chat_req.with_system(system_prompt);
            }
            let chat_req = chat_req.append_message(ChatMessage::user(prompt.to_string()));

            let chat_options = ChatOptions::default()
                .with_temperature(options.temperature as f64)
                .with_max_tokens(options.max_new_tokens);

            tracing::debug!(model = %self.model, "[GENERATE] calling provider");
            let chat_res = self
                .client
                .exec_chat(&self.model, chat_req, Some(&chat_options))
                .await
                .map_err(|e| GenerationError::Provider(format!("{e:?}")))?;

            let text = chat_res
                .first_text()
                .ok_or(GenerationError::EmptyResponse)?
                .trim()
                .to_string();

            if text.is_empty() {
                return Err(GenerationError::EmptyResponse);
            }
            Ok(text)
        }

        fn name(&self) -> &str {
            &self.model
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider() {
        assert_eq!("openai".parse::<AiProvider>().unwrap(), AiProvider::OpenAI);
        assert_eq!(" Ollama ".parse::<AiProvider>().unwrap(), AiProvider::Ollama);
        assert!("gpt2".parse::<AiProvider>().is_err());
    }

    #[test]
    fn test_missing_api_key_is_not_configured() {
        let config = GenerationConfig {
            provider: AiProvider::Anthropic,
            model: AiProvider::Anthropic.default_model().to_string(),
            api_key: None,
            system_prompt: None,
        };
        let err = load_generator(&config).err().expect("missing key must fail");
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_local_provider_needs_no_key() {
        let config = GenerationConfig {
            provider: AiProvider::Ollama,
            model: "llama3.2".to_string(),
            api_key: None,
            system_prompt: None,
        };
        assert!(config.check_credentials().is_ok());
    }
}
