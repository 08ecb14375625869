//! LLM Layer
//!
//! This module handles all interactions with Large Language Models, including:
//! - Provider abstraction and the OpenRouter backend
//! - Offline content synthesis when no provider is available
//! - The client that picks between them

pub mod types;
pub mod provider;
pub mod openrouter;
pub mod offline;
pub mod client;

// Re-export key types
pub use client::LlmClient;
pub use openrouter::OpenRouterProvider;
pub use provider::LLMProvider;
pub use types::{ContentSource, Generated, GenerationParams, Message, Role};
