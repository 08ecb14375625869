//! lessonsmith: generate educational lessons with an LLM and keep them in memory.
//!
//! A request names a topic and grade level. The service builds a prompt, asks
//! the configured provider (or the offline generator) for a lesson, parses the
//! reply and stores the result. Lessons can later be extended with more content.

pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod seed;
pub mod server;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::LessonError;
pub use llm::{ContentSource, LLMProvider, LlmClient};
pub use pipeline::{LessonPipeline, PipelineOutcome};
pub use store::LessonStore;
pub use types::{ContinuationRequest, GenerationRequest, Lesson, LessonDraft, QuizQuestion};
