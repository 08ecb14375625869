//! Quiz validation for model-supplied questions.

use serde_json::Value;

use crate::types::QuizQuestion;

/// Every question must offer at least this many options
pub const MIN_OPTIONS: usize = 4;

/// Keep only well-formed questions from a model's `quiz` value.
///
/// A question survives if it has text, at least [`MIN_OPTIONS`] options and a
/// `correctAnswer` that indexes into them. Returns `None` when nothing
/// survives or `quiz` is not an array.
pub fn validate_quiz(quiz: &Value) -> Option<Vec<QuizQuestion>> {
    let entries = quiz.as_array()?;

    let questions: Vec<QuizQuestion> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match check_question(entry) {
            Ok(question) => Some(question),
            Err(reason) => {
                tracing::warn!(index, %reason, "dropping quiz question");
                None
            }
        })
        .collect();

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

fn check_question(entry: &Value) -> Result<QuizQuestion, String> {
    let question: QuizQuestion =
        serde_json::from_value(entry.clone()).map_err(|e| format!("malformed question: {e}"))?;

    if question.question.trim().is_empty() {
        return Err("empty question text".to_string());
    }
    if question.options.len() < MIN_OPTIONS {
        return Err(format!(
            "{} options, expected at least {}",
            question.options.len(),
            MIN_OPTIONS
        ));
    }
    if question.correct_answer >= question.options.len() {
        return Err(format!(
            "correct answer {} out of range for {} options",
            question.correct_answer,
            question.options.len()
        ));
    }
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_quiz_kept() {
        let quiz = json!([
            {"question": "2+2?", "options": ["1", "2", "3", "4"], "correctAnswer": 3},
            {"question": "Sky?", "options": ["blue", "red", "green", "pink", "grey"], "correctAnswer": 0}
        ]);
        let questions = validate_quiz(&quiz).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, 3);
    }

    #[test]
    fn test_invalid_questions_dropped() {
        let quiz = json!([
            {"question": "ok", "options": ["a", "b", "c", "d"], "correctAnswer": 1},
            {"question": "out of range", "options": ["a", "b", "c", "d"], "correctAnswer": 4},
            {"question": "too few", "options": ["a", "b"], "correctAnswer": 0},
            {"question": "", "options": ["a", "b", "c", "d"], "correctAnswer": 0},
            {"question": "negative", "options": ["a", "b", "c", "d"], "correctAnswer": -1},
            {"question": "string index", "options": ["a", "b", "c", "d"], "correctAnswer": "1"},
            "not even an object"
        ]);
        let questions = validate_quiz(&quiz).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "ok");
    }

    #[test]
    fn test_nothing_survives() {
        let quiz = json!([{"question": "q", "options": [], "correctAnswer": 0}]);
        assert!(validate_quiz(&quiz).is_none());
        assert!(validate_quiz(&json!([])).is_none());
        assert!(validate_quiz(&json!({"question": "q"})).is_none());
    }
}
