//! Offline content synthesis.
//!
//! Used when no provider credential is configured or the provider call fails.
//! The output is a JSON string in the same shape the real model is asked to
//! produce, so the parser cannot tell the two apart.

use serde_json::json;

const TOPIC_MARKER: &str = "topic:";
const GRADE_MARKER: &str = "grade level:";
const DEFAULT_TOPIC: &str = "the requested topic";
const DEFAULT_GRADE: &str = "middle school";

/// Read time reported for the canned lesson
const LESSON_READ_TIME: u32 = 5;
/// Read time reported for the canned continuation
const CONTINUATION_READ_TIME: u32 = 3;

/// First non-empty value following a case-insensitive marker, up to the end
/// of its line. Markers with nothing after them ("on the following topic:")
/// are skipped.
fn value_after_marker<'a>(prompt: &'a str, lowered: &str, marker: &str) -> Option<&'a str> {
    // ASCII lowering keeps byte offsets aligned with the original prompt
    lowered.match_indices(marker).find_map(|(pos, _)| {
        let rest = &prompt[pos + marker.len()..];
        let value = rest.split('\n').next().unwrap_or(rest).trim();
        (!value.is_empty()).then_some(value)
    })
}

/// Capitalize the first letter of every word and lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

/// Produce deterministic placeholder content for a prompt.
pub fn synthetic_content(prompt: &str) -> String {
    let lowered = prompt.to_ascii_lowercase();

    let topic = value_after_marker(prompt, &lowered, TOPIC_MARKER).unwrap_or(DEFAULT_TOPIC);
    let grade = value_after_marker(prompt, &lowered, GRADE_MARKER).unwrap_or(DEFAULT_GRADE);

    // "continue" also matches "continuation"
    if lowered.contains("continue") || lowered.contains("continuation") {
        return continuation_json(topic, grade);
    }

    let include_quiz = lowered.contains("quiz") && lowered.contains("include");
    lesson_json(topic, grade, include_quiz)
}

fn continuation_json(topic: &str, grade: &str) -> String {
    let continuation = format!(
        r#"## Additional Information about {topic}

This section provides more in-depth information about {topic} for {grade} students.

### Key Concepts in Detail

When studying {topic}, it's important to understand these additional concepts:

1. The historical development of {topic}
2. Modern applications of {topic}
3. Future directions and innovations related to {topic}

### Practical Examples

Here are some practical examples that illustrate {topic} in real-world contexts:

- Example 1: A real-world application in everyday life
- Example 2: How {topic} is used in professional settings
- Example 3: An interesting case study that demonstrates the importance of {topic}

### Review Questions

1. What are the main principles of {topic}?
2. How does {topic} apply to real-world situations?
3. Why is understanding {topic} important for future learning?"#
    );

    json!({
        "continuation": continuation,
        "readTimeIncrement": CONTINUATION_READ_TIME,
    })
    .to_string()
}

fn lesson_json(topic: &str, grade: &str, include_quiz: bool) -> String {
    let title = title_case(topic);
    let content = format!(
        r#"# Introduction to {title}

This is an introduction to {topic} designed for {grade} students.

## What is {title}?

{title} is an important concept that involves understanding key principles and applications.

## Key Concepts

Here are some important concepts related to {topic}:

1. Fundamental principles of {topic}
2. Historical development of {topic}
3. Modern applications of {topic}
4. Future directions in {topic}

## Why Study {title}?

Studying {topic} is important because:

- It helps us understand the world around us
- It provides practical skills for everyday life
- It forms the foundation for advanced studies in related areas

## Main Components

The main components of {topic} include:

1. Component A: Description and examples
2. Component B: Description and examples
3. Component C: Description and examples

## Activities and Applications

Here are some ways to apply knowledge of {topic}:

- Activity 1: Description of a hands-on activity
- Activity 2: A real-world application
- Activity 3: A group project idea

## Summary

In this lesson, we've explored the fundamental aspects of {topic}, including its key concepts, why it matters, and how it can be applied in various contexts."#
    );

    let mut response = json!({
        "title": format!("Introduction to {title}"),
        "content": content,
        "readTime": LESSON_READ_TIME,
    });

    if include_quiz {
        response["quiz"] = json!([
            {
                "question": format!("What is the main purpose of studying {topic}?"),
                "options": [
                    "To pass exams only",
                    "To understand the world and gain practical skills",
                    "To memorize facts",
                    "To complete homework assignments"
                ],
                "correctAnswer": 1
            },
            {
                "question": format!("Which of the following is NOT a key concept related to {topic}?"),
                "options": [
                    "Fundamental principles",
                    "Historical development",
                    "Unrelated subjects",
                    "Future directions"
                ],
                "correctAnswer": 2
            },
            {
                "question": format!("How many main components of {topic} were discussed in the lesson?"),
                "options": ["One", "Two", "Three", "Four"],
                "correctAnswer": 2
            }
        ]);
    }

    response.to_string()
}
