//! Universal types for LLM interactions.
//!
//! These types isolate the application logic from specific provider APIs.

use serde::{Deserialize, Serialize};

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// Sampling parameters for a single completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Standardized response from an LLM provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The generated text content
    pub content: String,
    /// Token usage statistics, when the provider reports them
    pub usage: Option<Usage>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// Where a piece of generated text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// The remote provider answered
    Remote,
    /// The remote provider was tried and failed; offline content was used
    Fallback { reason: String },
    /// No credential is configured, so the provider was never called
    Offline,
}

impl ContentSource {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Remote)
    }
}

/// Text returned by the client along with its provenance.
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub source: ContentSource,
}
