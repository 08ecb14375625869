//! Example lessons loaded at startup so a fresh server has something to show.

use crate::types::{LessonDraft, QuizQuestion};

const PHOTOSYNTHESIS: &str = r#"# Introduction to Photosynthesis

Photosynthesis is the process by which plants, algae, and some bacteria convert light energy, usually from the sun, into chemical energy in the form of glucose or other sugars.

## The Process of Photosynthesis

The process of photosynthesis can be summarized by the following equation:

6CO₂ + 6H₂O + light energy → C₆H₁₂O₆ + 6O₂

This means that carbon dioxide and water, with the help of light energy, are transformed into glucose and oxygen.

## Why Photosynthesis Matters

Photosynthesis is crucial for life on Earth for several reasons:

1. It produces oxygen, which most organisms need to breathe
2. It removes carbon dioxide from the atmosphere
3. It creates the basis for most food chains on Earth

## Parts of a Plant Involved in Photosynthesis

The primary site of photosynthesis in plants is the leaf. Within the leaf cells are structures called chloroplasts, which contain the green pigment chlorophyll. This pigment captures light energy, which is the first step in the photosynthesis process.

## Stages of Photosynthesis

Photosynthesis occurs in two main stages:

1. **Light-dependent reactions**: These take place in the thylakoid membrane and convert light energy into chemical energy
2. **Light-independent reactions** (Calvin cycle): These take place in the stroma and use the chemical energy to produce glucose

## Fun Fact

Did you know that the oxygen we breathe today was likely produced by photosynthetic organisms like plants and algae? That's why conserving forests and oceans is so important for our planet!"#;

const FRACTIONS: &str = r#"# Introduction to Fractions

Fractions are a way of representing parts of a whole. They are very useful in everyday life!

## What is a Fraction?

A fraction has two parts:
- The **numerator** (top number) tells us how many parts we have
- The **denominator** (bottom number) tells us how many equal parts the whole is divided into

For example, in the fraction 3/4:
- 3 is the numerator
- 4 is the denominator

This means we have 3 out of 4 equal parts.

## Visual Representation

Fractions can be easily understood using visual models:

1. **Pie or circle model**: A circle divided into equal parts
2. **Bar model**: A rectangle divided into equal parts
3. **Number line**: Points on a number line between whole numbers

## Types of Fractions

1. **Proper fractions**: The numerator is less than the denominator (e.g., 3/4)
2. **Improper fractions**: The numerator is greater than or equal to the denominator (e.g., 5/4)
3. **Mixed numbers**: A whole number and a proper fraction (e.g., 1 1/4)

## Equivalent Fractions

Equivalent fractions represent the same value but use different numbers. To find equivalent fractions, multiply or divide both the numerator and denominator by the same number.

For example:
1/2 = 2/4 = 3/6 = 4/8

## Fractions in Real Life

We use fractions every day! Some examples include:
- Measuring ingredients in cooking (1/2 cup of sugar)
- Telling time (quarter past three, half past four)
- Sales and discounts (25% off = 1/4 off)

## Remember!

The denominator cannot be zero because you cannot divide something into zero parts."#;

/// The two bundled example lessons, in the order they are stored
pub fn example_lessons() -> Vec<LessonDraft> {
    vec![
        LessonDraft {
            topic: "Introduction to Photosynthesis".to_string(),
            grade_level: "middle_school".to_string(),
            lesson_style: Some("interactive".to_string()),
            content: PHOTOSYNTHESIS.to_string(),
            read_time: 5,
            include_quiz: true,
            quiz: Some(vec![
                QuizQuestion::new(
                    "What is the primary pigment in plants that captures light energy?",
                    &["Melanin", "Chlorophyll", "Hemoglobin", "Carotene"],
                    1,
                ),
                QuizQuestion::new(
                    "Which gas is produced during photosynthesis?",
                    &["Carbon Dioxide", "Nitrogen", "Oxygen", "Hydrogen"],
                    2,
                ),
                QuizQuestion::new(
                    "Where does the light-independent reaction take place in the chloroplast?",
                    &["Thylakoid membrane", "Cell wall", "Stroma", "Mitochondria"],
                    2,
                ),
            ]),
        },
        LessonDraft {
            topic: "Introduction to Fractions".to_string(),
            grade_level: "elementary".to_string(),
            lesson_style: Some("visual".to_string()),
            content: FRACTIONS.to_string(),
            read_time: 4,
            include_quiz: true,
            quiz: Some(vec![
                QuizQuestion::new(
                    "In the fraction 5/8, what is the denominator?",
                    &["5", "8", "13", "40"],
                    1,
                ),
                QuizQuestion::new(
                    "Which of these is an improper fraction?",
                    &["3/4", "2/5", "7/6", "1/2"],
                    2,
                ),
                QuizQuestion::new(
                    "Which fraction is equivalent to 1/2?",
                    &["2/5", "3/5", "2/6", "3/6"],
                    3,
                ),
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_have_valid_quizzes() {
        for lesson in example_lessons() {
            let quiz = lesson.quiz.expect("examples carry quizzes");
            assert_eq!(quiz.len(), 3);
            for q in quiz {
                assert_eq!(q.options.len(), 4);
                assert!(q.correct_answer < q.options.len());
            }
        }
    }
}
