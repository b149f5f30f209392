//! Exercise synthesizers.
//!
//! Each module turns one lesson sentence into a quiz item. Every public
//! `generate` function is best-effort and returns `None` when the sentence
//! does not fit its pattern:
//!
//! ```ignore
//! pub fn generate<R: RngCore + ?Sized>(
//!     sentence: &str,
//!     /* lesson keywords, where needed */
//!     lang: Language,
//!     salt: &str,
//!     rng: &mut R,
//! ) -> Option<Exercise>
//! ```
//!
//! [`derive_lesson_exercises`] runs all three once per lesson.

/// `derived_tf__` items: verbatim or negated statements
pub mod true_false;
/// `derived_cloze__` items: one keyword blanked out
pub mod cloze;
/// `derived_mc__` items: "what best describes <subject>?"
pub mod multiple_choice;

use std::collections::HashSet;

use rand::RngCore;

use crate::practice_engine::{
    config::PracticeConfig,
    models::{Exercise, Language, Lesson},
    rng::pick_one,
    text::{extract_keywords, qualifying_sentences},
};

/// Derive up to `max_derived_per_lesson` exercises from a lesson's prose.
///
/// Each synthesizer gets its own randomly picked qualifying sentence. Items
/// repeating an earlier `(type, prompt)` pair are dropped.
pub fn derive_lesson_exercises<R: RngCore + ?Sized>(
    lesson: &Lesson,
    lang: Language,
    rng: &mut R,
    seed: &str,
    config: &PracticeConfig,
) -> Vec<Exercise> {
    let text = lesson.narrative_text();
    if text.is_empty() {
        return Vec::new();
    }

    let sentences = qualifying_sentences(&text, config.min_sentence_chars, config.max_sentence_chars);
    if sentences.is_empty() {
        return Vec::new();
    }

    let keywords = extract_keywords(&text, lang);
    let salt = format!("{}|lesson:{}", seed, lesson.id);

    let mut derived = Vec::with_capacity(3);

    if let Some(s) = pick_one(&sentences, rng) {
        derived.extend(true_false::generate(s, lang, &salt, rng, config.negation_probability));
    }
    if let Some(s) = pick_one(&sentences, rng) {
        derived.extend(cloze::generate(s, &keywords, lang, &salt, rng));
    }
    if let Some(s) = pick_one(&sentences, rng) {
        derived.extend(multiple_choice::generate(s, &keywords, lang, &salt, rng));
    }

    let mut seen = HashSet::new();
    derived.retain(|ex| seen.insert(ex.dedup_key()));
    derived.truncate(config.max_derived_per_lesson);
    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice_engine::fixtures;
    use crate::practice_engine::models::ExerciseType;
    use crate::practice_engine::rng::Mulberry32;

    #[test]
    fn lesson_yields_at_most_three_unique_items() {
        let course = fixtures::course_en();
        let cfg = PracticeConfig::default();
        for lesson in course.ordered_lessons() {
            for seed in 0..10 {
                let out = derive_lesson_exercises(lesson, Language::En, &mut Mulberry32::new(seed), "seed", &cfg);
                assert!(out.len() <= 3);
                let keys: HashSet<_> = out.iter().map(Exercise::dedup_key).collect();
                assert_eq!(keys.len(), out.len());
            }
        }
    }

    #[test]
    fn every_lesson_with_prose_gets_a_true_false_item() {
        let course = fixtures::course_en();
        let cfg = PracticeConfig::default();
        for lesson in course.ordered_lessons() {
            let out = derive_lesson_exercises(lesson, Language::En, &mut Mulberry32::new(1), "seed", &cfg);
            assert!(
                out.iter().any(|e| e.exercise_type() == ExerciseType::TrueFalse),
                "no true/false item for {}",
                lesson.id
            );
        }
    }

    #[test]
    fn lesson_without_prose_yields_nothing() {
        let mut lesson = fixtures::course_en().ordered_lessons()[0].clone();
        lesson.description.clear();
        lesson.intro_text = None;
        lesson.interpretation = None;
        lesson.quote = None;
        let out = derive_lesson_exercises(
            &lesson,
            Language::En,
            &mut Mulberry32::new(1),
            "seed",
            &PracticeConfig::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn derivation_is_deterministic_per_seed() {
        let course = fixtures::course_en();
        let lesson = course.ordered_lessons()[0];
        let cfg = PracticeConfig::default();
        let a = derive_lesson_exercises(lesson, Language::En, &mut Mulberry32::new(9), "seed", &cfg);
        let b = derive_lesson_exercises(lesson, Language::En, &mut Mulberry32::new(9), "seed", &cfg);
        assert_eq!(a, b);
    }
}
