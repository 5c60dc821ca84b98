//! OpenAI Chat Completions API provider.
//!
//! Also serves OpenAI-compatible servers, which share the wire format but
//! need an explicit base URL and may not require a key.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::types::Message;

use super::http::{bearer_headers, shared_client};
use super::{CompletionRequest, ModelProvider};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    provider_name: &'static str,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(model: String, api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            provider_name: "openai",
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model,
            api_key,
        }
    }

    /// Provider for an OpenAI-compatible server.
    pub fn compatible(model: String, api_key: Option<String>, base_url: String) -> Self {
        Self {
            provider_name: "openai-compatible",
            model,
            api_key,
            base_url,
        }
    }

    /// Build the JSON request body. Pure: identical requests serialize to
    /// identical bytes.
    pub fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(temp) = request.settings.temperature {
                obj.insert("temperature".into(), temp.into());
            }
            if let Some(max) = request.settings.max_tokens {
                obj.insert("max_tokens".into(), max.into());
            }
        }

        body
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        self.provider_name
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        debug!(
            provider = self.provider_name,
            model = %self.model,
            messages = request.messages.len(),
            "OpenAI complete"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(self.api_key.as_deref()))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(super::http::status_to_error(status, &body_text));
        }

        let data: OpenAiChatResponse = resp.json().await?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in OpenAI response".into()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

fn message_to_openai(msg: &Message) -> serde_json::Value {
    serde_json::json!({ "role": msg.role.to_string(), "content": msg.content })
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}
