//! Core data types for lessons and the requests that produce them.
//!
//! Field names serialize in camelCase to match the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LessonError;

/// Minimum topic length accepted by the generation endpoint
const MIN_TOPIC_CHARS: usize = 3;

/// A single multiple-choice question attached to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct_answer: usize,
}

impl QuizQuestion {
    pub fn new(question: impl Into<String>, options: &[&str], correct_answer: usize) -> Self {
        Self {
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer,
        }
    }
}

/// A stored lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: u64,
    pub topic: String,
    pub grade_level: String,
    pub lesson_style: Option<String>,
    /// Markdown body; only ever appended to
    pub content: String,
    /// Estimated read time in minutes
    pub read_time: u32,
    pub created_at: DateTime<Utc>,
    pub include_quiz: bool,
    pub quiz: Option<Vec<QuizQuestion>>,
}

/// Everything needed to create a lesson except the fields the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDraft {
    pub topic: String,
    pub grade_level: String,
    pub lesson_style: Option<String>,
    pub content: String,
    pub read_time: u32,
    pub include_quiz: bool,
    pub quiz: Option<Vec<QuizQuestion>>,
}

/// Request body for `POST /api/lessons`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub topic: String,
    pub grade_level: String,
    #[serde(default)]
    pub lesson_style: Option<String>,
    #[serde(default)]
    pub additional_instructions: Option<String>,
    #[serde(default)]
    pub include_quiz: bool,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, grade_level: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            grade_level: grade_level.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.lesson_style = Some(style.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.additional_instructions = Some(instructions.into());
        self
    }

    pub fn with_quiz(mut self, include_quiz: bool) -> Self {
        self.include_quiz = include_quiz;
        self
    }

    /// Reject requests the prompt cannot sensibly be built from.
    pub fn validate(&self) -> Result<(), LessonError> {
        if self.topic.trim().chars().count() < MIN_TOPIC_CHARS {
            return Err(LessonError::InvalidRequest(format!(
                "Topic must be at least {} characters long",
                MIN_TOPIC_CHARS
            )));
        }
        if self.grade_level.trim().is_empty() {
            return Err(LessonError::InvalidRequest(
                "Grade level is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Request body for `POST /api/lessons/:id/continue`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationRequest {
    #[serde(default)]
    pub additional_instructions: Option<String>,
}
