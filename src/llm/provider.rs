//! The Provider Abstraction.
//!
//! Any chat-completion backend plugs in here. The client owns at most one
//! provider and decides what to do when it fails.

use anyhow::Result;
use async_trait::async_trait;
use super::types::{CompletionResponse, GenerationParams, Message};

/// The core trait for LLM interactions.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send a chat completion request.
    async fn completion(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<CompletionResponse>;
}
