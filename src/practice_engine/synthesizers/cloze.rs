use rand::RngCore;

use crate::practice_engine::{
    helpers::{derived, derived_id, localized},
    models::{Exercise, ExerciseKind, Language},
    rng::{pick_one, shuffled},
    text::{extract_keywords, fallback_distractors, normalize_ws, replace_first_word_ci, unique_strings},
};

pub const BLANK: &str = "_____";

/// Blank one keyword of `sentence` and offer it among up to three distractors.
///
/// The keyword is drawn from the sentence's own keywords merged with the
/// lesson-wide ones; when the drawn word does not occur in the sentence the
/// attempt yields nothing.
pub fn generate<R: RngCore + ?Sized>(
    sentence: &str,
    lesson_keywords: &[String],
    lang: Language,
    salt: &str,
    rng: &mut R,
) -> Option<Exercise> {
    let cleaned = normalize_ws(sentence);
    if cleaned.chars().count() < 25 {
        return None;
    }

    let local_keywords = extract_keywords(&cleaned, lang);
    let candidates: Vec<String> = unique_strings(local_keywords.iter().chain(lesson_keywords))
        .into_iter()
        .filter(|w| w.chars().count() >= 5)
        .collect();

    let chosen = pick_one(&candidates, rng)?.clone();

    let blanked = replace_first_word_ci(&cleaned, &chosen, BLANK);
    if blanked == cleaned {
        return None;
    }

    let prompt = localized(
        lang,
        format!("Fill in the blank: {}", blanked),
        format!("Setze das fehlende Wort ein: {}", blanked),
    );

    let pool: Vec<String> = unique_strings(
        lesson_keywords
            .iter()
            .map(String::as_str)
            .chain(fallback_distractors(lang).iter().copied()),
    )
    .into_iter()
    .filter(|w| *w != chosen)
    .collect();
    let mut distractors = unique_strings(shuffled(&pool, rng));
    distractors.truncate(3);

    let options = shuffled(
        &unique_strings(std::iter::once(chosen.clone()).chain(distractors)),
        rng,
    );
    if options.len() < 2 {
        return None;
    }

    Some(derived(
        derived_id("derived_cloze", &[salt, "cloze", &prompt, &chosen]),
        prompt,
        ExerciseKind::Cloze { options, answer: chosen },
        localized(
            lang,
            "Hint: The missing word is taken from the lesson's intro/interpretation.",
            "Hinweis: Das Wort stammt aus dem Einführungstext/der Deutung der Lektion.",
        ),
    ))
}
