//! Completion providers and the service that binds them to a configuration.

pub mod http;
pub mod service;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "anthropic")]
pub mod anthropic;

pub use service::CompletionService;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{Backend, CompletionConfig};
use crate::error::{ProviderError, SimError};
use crate::types::{GenerationSettings, Message};

/// A request sent to a model provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub settings: GenerationSettings,
}

/// Core trait implemented by all completion backends.
///
/// One call is one blocking round trip that yields the primary candidate's
/// text. Implementations do not retry.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai", "anthropic").
    fn provider_name(&self) -> &str;
    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Produce one completion for the request.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

/// Create the provider for the configured backend.
///
/// Credentials and base URLs are checked here, so a runtime that was built
/// successfully never fails for configuration reasons on its first call.
#[allow(unused_variables)]
pub fn create_provider(config: &CompletionConfig) -> Result<Box<dyn ModelProvider>, SimError> {
    match config.backend {
        #[cfg(feature = "openai")]
        Backend::OpenAi => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| SimError::Configuration("Missing OPENAI_API_KEY".into()))?;
            Ok(Box::new(openai::OpenAiProvider::new(
                config.model.clone(),
                Some(api_key),
                config.base_url.clone(),
            )))
        }
        #[cfg(feature = "anthropic")]
        Backend::Anthropic => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| SimError::Configuration("Missing ANTHROPIC_API_KEY".into()))?;
            Ok(Box::new(anthropic::AnthropicProvider::new(
                config.model.clone(),
                api_key,
                config.base_url.clone(),
            )))
        }
        #[cfg(feature = "openai-compatible")]
        Backend::OpenAiCompatible => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                SimError::Configuration("Missing OPENAI_COMPAT_BASE_URL".into())
            })?;
            Ok(Box::new(openai::OpenAiProvider::compatible(
                config.model.clone(),
                config.api_key.clone(),
                base_url,
            )))
        }
        #[allow(unreachable_patterns)]
        other => Err(SimError::UnsupportedBackend(format!(
            "{other} (not enabled via feature flags)"
        ))),
    }
}
