//! Prompt construction for lesson generation and continuation.
//!
//! Prompts are plain text templates. Both ask the model to answer with a JSON
//! object; [`parse`] recovers that object from whatever the model sends back.

pub mod parse;

pub use parse::{parse_model_response, ExtractionStrategy, ParseError, ParsedReply};

use crate::types::{ContinuationRequest, GenerationRequest};

/// Reading speed used for read time estimates
const WORDS_PER_MINUTE: usize = 200;

/// System prompt sent with every generation and continuation request
pub const SYSTEM_PROMPT: &str = "You are an expert educational content creator with years of experience in curriculum development.
Your task is to create high-quality, engaging, and educational lesson content based on user specifications.
Format your responses in markdown, with proper headings, lists, and emphasis where appropriate.
Make the content accurate, age-appropriate, and aligned with educational standards.
Focus on clarity, engagement, and educational value.";

const QUIZ_INSTRUCTIONS: &str = "
Include a quiz at the end of the lesson with 3-5 multiple-choice questions that test understanding of the key concepts.
For each question, provide:
- The question text
- Four answer options
- The index of the correct answer (0-3)
";

const QUIZ_SCHEMA: &str = r#",
  "quiz": [
    {
      "question": "Question text",
      "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
      "correctAnswer": correct_answer_index
    },
    // Additional questions...
  ]
"#;

/// Human-readable description of a grade level code.
///
/// Unknown codes are echoed back unchanged.
pub fn grade_level_description(code: &str) -> &str {
    match code {
        "elementary" => "Elementary School (Grades K-5)",
        "middle_school" => "Middle School (Grades 6-8)",
        "high_school" => "High School (Grades 9-12)",
        "college" => "College/University Level",
        "adult" => "Adult Education",
        "professional" => "Professional Development",
        other => other,
    }
}

/// Teaching-approach instruction for a lesson style code.
pub fn lesson_style_description(code: &str) -> String {
    let known = match code {
        "standard" => "Use a standard, straightforward teaching approach.",
        "interactive" => "Make the lesson interactive with activities and engagement opportunities.",
        "visual" => "Emphasize visual learning with descriptive examples and mental imagery.",
        "inquiry" => {
            "Use an inquiry-based approach that encourages critical thinking and questioning."
        }
        "project" => "Design the lesson around a project-based learning approach.",
        "discussion" => "Structure the lesson to facilitate discussion and debate.",
        "storytelling" => "Use narrative techniques and storytelling to convey information.",
        other => return format!("Style: {}", other),
    };
    known.to_string()
}

fn additional_line(instructions: Option<&str>) -> String {
    match instructions {
        Some(text) if !text.trim().is_empty() => format!("Additional instructions: {}\n", text),
        _ => String::new(),
    }
}

/// Build the prompt that asks for a brand new lesson.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    let grade = grade_level_description(&request.grade_level);
    let style = request
        .lesson_style
        .as_deref()
        .map(lesson_style_description)
        .unwrap_or_default();
    let additional = additional_line(request.additional_instructions.as_deref());
    let quiz = if request.include_quiz {
        QUIZ_INSTRUCTIONS
    } else {
        ""
    };

    let mut prompt = format!(
        r#"Create an educational lesson on the following topic:
Topic: {topic}
Grade Level: {grade}
{style}
{additional}

The lesson should be comprehensive, accurate, and engaging for the specified grade level.
Include a clear introduction, body with key concepts, and conclusion.
Use markdown formatting with headings, lists, and emphasis for clarity.
{quiz}

Return your response as a JSON object with the following structure:
{{
  "title": "The title of the lesson",
  "content": "The full lesson content in markdown",
  "readTime": estimated_read_time_in_minutes
"#,
        topic = request.topic,
    );

    if request.include_quiz {
        prompt.push_str(QUIZ_SCHEMA);
    }
    prompt.push_str("\n}");
    prompt
}

/// Build the prompt that asks for more content on an existing lesson.
pub fn build_continuation_prompt(
    existing_content: &str,
    request: Option<&ContinuationRequest>,
) -> String {
    let additional = additional_line(request.and_then(|r| r.additional_instructions.as_deref()));

    format!(
        r#"Continue the following educational lesson by adding more content.

Original lesson:
```
{existing_content}
```

{additional}
Continue this lesson by adding additional content that builds on what's already covered.
Add new sections, examples, or activities that enhance the educational value.
Maintain the same tone, style, and grade level as the original content.
Use markdown formatting with headings, lists, and emphasis for clarity.

Return your response as a JSON object with the following structure:
{{
  "continuation": "The additional content to append to the lesson",
  "readTimeIncrement": estimated_additional_read_time_in_minutes
}}
"#
    )
}

/// Estimate reading time in whole minutes, never less than one.
pub fn estimate_read_time(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
