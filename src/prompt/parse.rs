//! Recovering a JSON object from free-form model output.
//!
//! Models wrap their JSON in prose or markdown fences more often than not.
//! Each [`ExtractionStrategy`] looks at the reply one way; they are tried in
//! [`ExtractionStrategy::ORDER`] and the first that yields an object wins.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Fenced block tagged as json, e.g. "```json\n{...}\n```"
const FENCED_JSON_PATTERN: &str = r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```";

/// The model reply could not be read as a JSON object by any strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse LLM response as JSON: {reason}")]
pub struct ParseError {
    pub reason: String,
}

/// One way of locating a JSON object inside a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Interior of a ```json fenced block
    FencedJson,
    /// Span from the first `{` to the last `}`
    BraceSpan,
    /// The whole reply as-is
    WholeText,
}

/// Outcome of a single strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(Map<String, Value>),
    /// The strategy found nothing to try (no fence, no braces)
    NotApplicable,
    Failed(String),
}

/// A successfully parsed reply and the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub strategy: ExtractionStrategy,
    pub fields: Map<String, Value>,
}

impl ExtractionStrategy {
    /// Most trusted first
    pub const ORDER: [ExtractionStrategy; 3] = [Self::FencedJson, Self::BraceSpan, Self::WholeText];

    pub fn name(&self) -> &'static str {
        match self {
            Self::FencedJson => "fenced-json",
            Self::BraceSpan => "brace-span",
            Self::WholeText => "whole-text",
        }
    }

    pub fn extract(&self, text: &str) -> Extraction {
        match self {
            Self::FencedJson => match fenced_json_regex() {
                Ok(re) => match re.captures(text).and_then(|c| c.get(1)) {
                    Some(body) => parse_object(body.as_str()),
                    None => Extraction::NotApplicable,
                },
                Err(e) => Extraction::Failed(e.to_string()),
            },
            Self::BraceSpan => match (text.find('{'), text.rfind('}')) {
                (Some(start), Some(end)) if start < end => parse_object(&text[start..=end]),
                _ => Extraction::NotApplicable,
            },
            Self::WholeText => parse_object(text),
        }
    }
}

fn fenced_json_regex() -> Result<&'static Regex, &'static regex::Error> {
    static RE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FENCED_JSON_PATTERN)).as_ref()
}

fn parse_object(candidate: &str) -> Extraction {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Extraction::Parsed(map),
        Ok(other) => Extraction::Failed(format!("expected a JSON object, found {}", kind(&other))),
        Err(e) => Extraction::Failed(e.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a model reply into its JSON fields.
///
/// Returns the reason given by the last strategy that actually attempted a
/// parse when nothing succeeds.
pub fn parse_model_response(text: &str) -> Result<ParsedReply, ParseError> {
    let mut last_failure = None;

    for strategy in ExtractionStrategy::ORDER {
        match strategy.extract(text) {
            Extraction::Parsed(fields) => {
                tracing::debug!(strategy = strategy.name(), "parsed model reply");
                return Ok(ParsedReply { strategy, fields });
            }
            Extraction::NotApplicable => {}
            Extraction::Failed(reason) => {
                tracing::debug!(strategy = strategy.name(), %reason, "extraction failed");
                last_failure = Some(reason);
            }
        }
    }

    let reason = last_failure.unwrap_or_else(|| "empty response".to_string());
    tracing::warn!(%reason, "failed to parse LLM response as JSON");
    Err(ParseError { reason })
}
