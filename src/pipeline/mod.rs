//! Lesson generation and continuation pipelines
//!
//! prompt → client → parse → store. Unparseable replies are stored as-is
//! rather than failing the request.

mod quiz;

pub use quiz::validate_quiz;

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::LessonError;
use crate::llm::{ContentSource, LlmClient};
use crate::prompt::{self, estimate_read_time, parse_model_response, SYSTEM_PROMPT};
use crate::store::LessonStore;
use crate::types::{ContinuationRequest, GenerationRequest, Lesson, LessonDraft};

/// A lesson together with how its text was produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub lesson: Lesson,
    pub source: ContentSource,
    /// False when the model reply had to be stored unparsed
    pub parsed: bool,
}

/// Runs both pipelines against a shared store and client
pub struct LessonPipeline {
    store: Arc<LessonStore>,
    llm: Arc<LlmClient>,
}

impl LessonPipeline {
    pub fn new(store: Arc<LessonStore>, llm: Arc<LlmClient>) -> Self {
        Self { store, llm }
    }

    pub fn store(&self) -> &LessonStore {
        &self.store
    }

    /// Create a new lesson from a generation request
    pub async fn generate(&self, request: &GenerationRequest) -> Result<PipelineOutcome, LessonError> {
        request.validate()?;
        tracing::info!(topic = %request.topic, "generating lesson");

        let prompt = prompt::build_generation_prompt(request);
        let generated = self.llm.generate_content(&prompt, Some(SYSTEM_PROMPT)).await;

        let (draft, parsed) = match parse_model_response(&generated.text) {
            Ok(reply) => (draft_from_reply(request, &reply.fields), true),
            Err(e) => {
                tracing::warn!(error = %e, "error parsing LLM response, storing raw reply");
                (draft_from_raw(request, &generated.text), false)
            }
        };

        let lesson = self.store.create_lesson(draft)?;
        tracing::info!(id = lesson.id, source = ?generated.source, "created lesson");

        Ok(PipelineOutcome {
            lesson,
            source: generated.source,
            parsed,
        })
    }

    /// Append generated content to an existing lesson
    pub async fn continue_lesson(
        &self,
        id: u64,
        request: Option<&ContinuationRequest>,
    ) -> Result<PipelineOutcome, LessonError> {
        let existing = self
            .store
            .get_lesson(id)?
            .ok_or(LessonError::NotFound(id))?;
        tracing::info!(id, "continuing lesson");

        let prompt = prompt::build_continuation_prompt(&existing.content, request);
        let generated = self.llm.generate_content(&prompt, Some(SYSTEM_PROMPT)).await;

        let (text, increment, parsed) = match parse_model_response(&generated.text) {
            Ok(reply) => {
                let text = string_field(&reply.fields, "continuation").unwrap_or_default();
                let increment = minutes_field(&reply.fields, "readTimeIncrement")
                    .unwrap_or_else(|| estimate_read_time(&text));
                (text, increment, true)
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "error parsing LLM response for continuation");
                let increment = estimate_read_time(&generated.text);
                (generated.text.clone(), increment, false)
            }
        };

        // The lesson may have been deleted while the provider was working
        let lesson = self
            .store
            .update_lesson(id, &text, increment)?
            .ok_or(LessonError::NotFound(id))?;

        Ok(PipelineOutcome {
            lesson,
            source: generated.source,
            parsed,
        })
    }
}

fn draft_from_reply(request: &GenerationRequest, fields: &Map<String, Value>) -> LessonDraft {
    let content = string_field(fields, "content").unwrap_or_default();
    let title = string_field(fields, "title").unwrap_or_else(|| request.topic.clone());
    // A reported read time of zero is no estimate at all
    let read_time = minutes_field(fields, "readTime")
        .filter(|minutes| *minutes > 0)
        .unwrap_or_else(|| estimate_read_time(&content));

    let quiz = if request.include_quiz {
        fields.get("quiz").and_then(validate_quiz)
    } else {
        None
    };

    LessonDraft {
        topic: request.topic.clone(),
        grade_level: request.grade_level.clone(),
        lesson_style: request.lesson_style.clone(),
        content: format!("# {}\n\n{}", title, content),
        read_time,
        include_quiz: request.include_quiz,
        quiz,
    }
}

fn draft_from_raw(request: &GenerationRequest, raw: &str) -> LessonDraft {
    LessonDraft {
        topic: request.topic.clone(),
        grade_level: request.grade_level.clone(),
        lesson_style: request.lesson_style.clone(),
        content: format!("# {}\n\n{}", request.topic, raw),
        read_time: estimate_read_time(raw),
        include_quiz: false,
        quiz: None,
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Non-negative whole minutes; fractions round up, anything else is ignored
fn minutes_field(fields: &Map<String, Value>, key: &str) -> Option<u32> {
    let value = fields.get(key)?;
    if let Some(n) = value.as_u64() {
        return Some(u32::try_from(n).unwrap_or(u32::MAX));
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 {
        Some(f.ceil().min(u32::MAX as f64) as u32)
    } else {
        None
    }
}
