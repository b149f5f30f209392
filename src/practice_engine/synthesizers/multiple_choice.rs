use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;

use crate::practice_engine::{
    helpers::{derived, derived_id, localized},
    models::{Exercise, ExerciseKind, Language},
    rng::shuffled,
    text::{fallback_distractors, first_words, normalize_ws, strip_quotes, truncate, unique_strings},
};

static EN_DEFINITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(.+?)\s+(is|means|refers to)\s+(.+?)(?:[.!?]|$)").unwrap());
static DE_DEFINITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(.+?)\s+(ist|bedeutet|steht für)\s+(.+?)(?:[.!?]|$)").unwrap());
static LEADING_DEMONSTRATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(this|that|dies|das)\s+").unwrap());
static LEADING_THAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^that\s+").unwrap());

const MAX_SUBJECT_WORDS: usize = 8;
const MAX_SUBJECT_CHARS: usize = 60;
const MAX_DEFINITION_CHARS: usize = 90;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub subject: String,
    pub definition: String,
}

/// Read `sentence` as "<subject> is/means/refers to <definition>".
pub fn parse_definition(sentence: &str, lang: Language) -> Option<Definition> {
    let s = normalize_ws(&sentence.replace(['“', '”'], "\""));
    let re = match lang {
        Language::En => &*EN_DEFINITION_RE,
        Language::De => &*DE_DEFINITION_RE,
    };
    let caps = re.captures(&s)?;

    let subject = normalize_ws(&strip_quotes(&caps[1]));
    let subject = LEADING_DEMONSTRATIVE_RE.replace(&subject, "").into_owned();

    let definition = normalize_ws(&strip_quotes(&caps[3]));
    let definition = definition.split([';', ':']).next().unwrap_or_default().trim();
    let definition = LEADING_THAT_RE.replace(definition, "").into_owned();

    if subject.chars().count() < 3 || definition.chars().count() < 3 {
        return None;
    }
    if subject.chars().count() > 80 {
        return None;
    }

    Some(Definition {
        subject: first_words(&subject, MAX_SUBJECT_WORDS),
        definition: definition.trim().to_string(),
    })
}

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

    let def = parse_definition(&cleaned, lang)?;
    let subject = truncate(&def.subject, MAX_SUBJECT_CHARS);
    let correct = truncate(&def.definition, MAX_DEFINITION_CHARS);
    if subject.chars().count() < 3 || correct.chars().count() < 3 {
        return None;
    }

    let prompt = localized(
        lang,
        format!("According to the lesson, what best describes \"{}\"?", subject),
        format!("Laut der Lektion: Was trifft am ehesten auf „{}“ zu?", subject),
    );

    let pool: Vec<String> = unique_strings(
        lesson_keywords
            .iter()
            .map(String::as_str)
            .chain(fallback_distractors(lang).iter().copied()),
    )
    .into_iter()
    .filter(|w| *w != correct)
    .collect();
    let distractors: Vec<String> = unique_strings(shuffled(&pool, rng))
        .into_iter()
        .map(|w| truncate(&w, MAX_DEFINITION_CHARS))
        .filter(|w| w.chars().count() >= 3 && *w != correct)
        .take(3)
        .collect();

    let options = shuffled(
        &unique_strings(std::iter::once(correct.clone()).chain(distractors)),
        rng,
    );
    if options.len() < 2 {
        return None;
    }

    Some(derived(
        derived_id("derived_mc", &[salt, "mc", &prompt, &correct]),
        prompt,
        ExerciseKind::MultipleChoice { options, answer: correct },
        localized(
            lang,
            "Derived from a sentence in the intro/interpretation.",
            "Abgeleitet aus einem Satz im Einführungstext/der Deutung.",
        ),
    ))
}
