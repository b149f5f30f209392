//! Answer checking for the quiz runner and reflection grading.
//!
//! Choice exercises compare the submitted option text exactly; true/false
//! accepts the localized words; sorting compares the whole order. Reflections
//! are never auto-graded: they go through a [`ReflectionGrader`], and
//! [`grade_reflection`] falls back to [`LocalReflectionGrader`] when the
//! configured grader fails.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::practice_engine::{
    error::Result,
    helpers::localized,
    models::{Exercise, ExerciseKind, Language},
};

/// What the learner submitted for one exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Chosen option text (or typed true/false word)
    Text(String),
    /// Options in the order the learner arranged them
    Order(Vec<String>),
}

impl Submission {
    pub fn text(s: impl Into<String>) -> Self {
        Submission::Text(s.into())
    }

    pub fn order<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Submission::Order(items.into_iter().map(Into::into).collect())
    }
}

/// `true/false` and `wahr/falsch` in either language, `ja/nein` in German.
pub fn parse_bool_answer(text: &str, language: Language) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "wahr" => Some(true),
        "false" | "falsch" => Some(false),
        "ja" if language == Language::De => Some(true),
        "nein" if language == Language::De => Some(false),
        _ => None,
    }
}

/// Whether `order` matches the expected sequence element for element.
pub fn check_order(expected: &[String], order: &[String]) -> bool {
    expected == order
}

/// `None` when the exercise cannot be auto-graded (reflections) or the
/// submission shape does not fit the exercise.
pub fn check_answer(exercise: &Exercise, submission: &Submission, language: Language) -> Option<bool> {
    match (&exercise.kind, submission) {
        (ExerciseKind::TrueFalse { answer, .. }, Submission::Text(text)) => {
            match parse_bool_answer(text, language) {
                Some(value) => Some(value == *answer),
                None => Some(text.trim() == answer.to_string()),
            }
        }
        (
            ExerciseKind::MultipleChoice { answer, .. }
            | ExerciseKind::Cloze { answer, .. }
            | ExerciseKind::Scenario { answer, .. },
            Submission::Text(text),
        ) => Some(text == answer),
        (ExerciseKind::Sorting { order: expected, .. }, Submission::Order(order)) => {
            Some(check_order(expected, order))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Reflection grading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionFeedback {
    /// 0..=100
    pub score: u8,
    pub feedback: String,
    pub is_pass: bool,
}

/// Something that can judge a free-text reflection.
pub trait ReflectionGrader {
    fn evaluate(&self, prompt: &str, answer: &str, language: Language) -> Result<ReflectionFeedback>;
}

/// Minimum trimmed length (in chars) for a reflection to pass locally.
pub const MIN_REFLECTION_CHARS: usize = 10;

/// Length-only heuristic; never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalReflectionGrader;

impl LocalReflectionGrader {
    pub fn grade(&self, answer: &str, language: Language) -> ReflectionFeedback {
        if answer.trim().chars().count() < MIN_REFLECTION_CHARS {
            ReflectionFeedback {
                score: 20,
                feedback: localized(
                    language,
                    "That was a bit short. Can you elaborate?",
                    "Das war etwas kurz. Kannst du das etwas genauer ausführen?",
                ),
                is_pass: false,
            }
        } else {
            ReflectionFeedback {
                score: 85,
                feedback: localized(
                    language,
                    "Good thought. It is important to see this connection.",
                    "Guter Gedanke. Es ist wichtig, diese Verbindung zu sehen.",
                ),
                is_pass: true,
            }
        }
    }
}

impl ReflectionGrader for LocalReflectionGrader {
    fn evaluate(&self, _prompt: &str, answer: &str, language: Language) -> Result<ReflectionFeedback> {
        Ok(self.grade(answer, language))
    }
}

/// Grade with `grader`, falling back to the local heuristic on any error.
pub fn grade_reflection<G: ReflectionGrader + ?Sized>(
    grader: &G,
    prompt: &str,
    answer: &str,
    language: Language,
) -> ReflectionFeedback {
    match grader.evaluate(prompt, answer, language) {
        Ok(feedback) => feedback,
        Err(err) => {
            warn!(error = %err, transient = err.is_transient(), "reflection grader failed, using local heuristic");
            LocalReflectionGrader.grade(answer, language)
        }
    }
}
