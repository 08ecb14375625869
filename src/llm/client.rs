//! LLM client with an offline fallback.
//!
//! The client always returns text. Provider failures are logged and replaced
//! with offline content; [`ContentSource`] records which path was taken.

use std::sync::Arc;

use super::offline::synthetic_content;
use super::provider::LLMProvider;
use super::types::{ContentSource, Generated, GenerationParams, Message};

pub struct LlmClient {
    provider: Option<Arc<dyn LLMProvider>>,
    params: GenerationParams,
}

impl LlmClient {
    /// Client that calls `provider` with the given default parameters
    pub fn new(provider: Arc<dyn LLMProvider>, params: GenerationParams) -> Self {
        tracing::info!(provider = provider.name(), model = %params.model, "initialized LLM client");
        Self {
            provider: Some(provider),
            params,
        }
    }

    /// Client that never touches the network
    pub fn offline() -> Self {
        tracing::warn!("no LLM provider configured, using offline content generation");
        Self {
            provider: None,
            params: GenerationParams::default(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// Generate text for `prompt` using the client's default parameters.
    pub async fn generate_content(&self, prompt: &str, system_prompt: Option<&str>) -> Generated {
        self.generate_content_with(prompt, system_prompt, &self.params)
            .await
    }

    /// Generate text for `prompt` with explicit sampling parameters.
    pub async fn generate_content_with(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        params: &GenerationParams,
    ) -> Generated {
        let Some(provider) = &self.provider else {
            return Generated {
                text: synthetic_content(prompt),
                source: ContentSource::Offline,
            };
        };

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system_prompt {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(prompt));

        tracing::info!(model = %params.model, "generating content");

        match provider.completion(&messages, params).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    tracing::debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        total_tokens = usage.total_tokens,
                        "completion usage"
                    );
                }
                Generated {
                    text: response.content,
                    source: ContentSource::Remote,
                }
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::error!(provider = provider.name(), error = %reason, "error generating content, using fallback");
                Generated {
                    text: synthetic_content(prompt),
                    source: ContentSource::Fallback { reason },
                }
            }
        }
    }
}
