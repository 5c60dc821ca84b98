//! Completion service: one configured provider plus the parameters bound to
//! every call.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::CompletionConfig;
use crate::error::{Result, SimError};
use crate::types::{GenerationSettings, Message};
use crate::util::timeout::with_deadline;

use super::{create_provider, CompletionRequest, ModelProvider};

/// The text-completion boundary as seen by the agent runtime.
///
/// The backend is resolved when the service is built. Every failure of
/// [`complete`](Self::complete) surfaces as [`SimError::ProviderCall`].
#[derive(Clone)]
pub struct CompletionService {
    provider: Arc<dyn ModelProvider>,
    settings: GenerationSettings,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for CompletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionService")
            .field("provider", &self.provider.provider_name())
            .field("model", &self.provider.model_id())
            .field("settings", &self.settings)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CompletionService {
    /// Validate the config and resolve its backend.
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        config.validate()?;
        let provider: Arc<dyn ModelProvider> = Arc::from(create_provider(config)?);
        let timeout = (config.request_timeout_secs > 0)
            .then(|| Duration::from_secs(config.request_timeout_secs));
        Ok(Self {
            provider,
            settings: config.settings(),
            timeout,
        })
    }

    /// Wrap an already-built provider (custom backends, tests).
    pub fn with_provider(provider: Arc<dyn ModelProvider>, settings: GenerationSettings) -> Self {
        Self {
            provider,
            settings,
            timeout: None,
        }
    }

    /// Set the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    pub fn settings(&self) -> GenerationSettings {
        self.settings
    }

    /// Bind the configured settings to a message list.
    pub fn build_request(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest {
            messages,
            settings: self.settings,
        }
    }

    /// One round trip to the backend.
    pub async fn complete(&self, messages: Vec<Message>) -> Result<String> {
        let request = self.build_request(messages);
        debug!(
            provider = self.provider.provider_name(),
            model = self.provider.model_id(),
            messages = request.messages.len(),
            "completion request"
        );

        let outcome = match self.timeout {
            Some(deadline) => with_deadline(deadline, self.provider.complete(&request)).await,
            None => self.provider.complete(&request).await,
        };

        outcome.map_err(|source| SimError::provider_call(self.provider.provider_name(), source))
    }
}
