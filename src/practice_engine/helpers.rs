//! Shared builder functions used by the synthesizers and the selector.
//!
//! Every synthesizer assembles the same pieces: pick wording for the active
//! language, hash a stable id, and bundle prompt, options and answer into an
//! [`Exercise`]. Cloning for practice lives here too, so the id scheme that
//! maps a practice copy back to its base exercise is defined in one place.

use rand::RngCore;

use crate::practice_engine::{
    models::{Exercise, ExerciseKind, Language},
    rng::{digest, shuffled},
};

/// Separator between a base exercise id and the practice-copy hash.
pub const PRACTICE_MARKER: &str = "__practice__";

/// Points awarded for any derived exercise.
pub const DERIVED_POINTS: u32 = 10;

/// Pick the wording for the active language.
pub fn localized(lang: Language, en: impl Into<String>, de: impl Into<String>) -> String {
    match lang {
        Language::En => en.into(),
        Language::De => de.into(),
    }
}

/// `"<prefix>__<hash(parts joined by '|')>"`, stable for identical inputs.
pub fn derived_id(prefix: &str, parts: &[&str]) -> String {
    format!("{}__{}", prefix, digest(&parts.join("|")))
}

/// Assemble a derived exercise.
pub fn derived(id: String, prompt: String, kind: ExerciseKind, explanation: String) -> Exercise {
    Exercise {
        id,
        prompt,
        kind,
        explanation: Some(explanation),
        points: DERIVED_POINTS,
    }
}

/// The id statistics are keyed by: everything before the first practice marker.
pub fn base_exercise_id(id: &str) -> &str {
    match id.find(PRACTICE_MARKER) {
        Some(idx) => &id[..idx],
        None => id,
    }
}

/// Copy `exercise` under a fresh practice id and shuffle its options.
///
/// The id is `<id>__practice__<hash(salt|id|prompt)>`, so the same salt always
/// regenerates the same id. Only the option order changes: the correct answer
/// is a value, not a position.
pub fn clone_for_practice<R: RngCore + ?Sized>(
    exercise: &Exercise,
    rng: &mut R,
    salt: &str,
) -> Exercise {
    let mut cloned = exercise.clone();
    cloned.id = format!(
        "{}{}{}",
        exercise.id,
        PRACTICE_MARKER,
        digest(&format!("{}|{}|{}", salt, exercise.id, exercise.prompt))
    );
    if let Some(options) = cloned.kind.options_mut() {
        if options.len() > 1 {
            *options = shuffled(options, rng);
        }
    }
    cloned
}
