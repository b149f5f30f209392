//! Text utilities for turning lesson prose into quiz material.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex, RegexBuilder};

use crate::practice_engine::models::Language;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+|[^.!?]+$").unwrap());

static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-zÀ-ÖØ-öø-ÿÄÖÜäöüß]+").unwrap());

static EDGE_QUOTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"+|"+$"#).unwrap());

/// Collapse runs of whitespace to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

/// Split into sentences ending in `.`, `!` or `?`; a trailing fragment
/// without terminator counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let cleaned = normalize_ws(text);
    if cleaned.is_empty() {
        return Vec::new();
    }
    SENTENCE_RE
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sentences whose trimmed length (in chars) lies in `min..=max`.
pub fn qualifying_sentences(text: &str, min: usize, max: usize) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| (min..=max).contains(&s.chars().count()))
        .collect()
}

const COMMON_STOPWORDS: &[&str] = &[
    "the", "and", "that", "this", "with", "from", "your", "you", "are", "for", "not",
    "eine", "einer", "eines", "und", "dass", "dies", "diese", "dieser", "mit", "aus",
    "dein", "deine", "deiner", "deines", "nicht", "oder", "wie", "sich", "sind", "ist",
    "einem", "einen", "also", "wir", "uns", "ihr", "sie", "der", "die", "das", "den",
    "dem", "des", "ein",
];

const EN_STOPWORDS: &[&str] = &[
    "also", "only", "more", "less", "can", "could", "must", "should", "will", "would",
];

const DE_STOPWORDS: &[&str] = &[
    "auch", "nur", "mehr", "weniger", "kann", "können", "muss", "musst", "soll", "sollte",
];

pub fn is_stopword(word: &str, lang: Language) -> bool {
    let extras = match lang {
        Language::En => EN_STOPWORDS,
        Language::De => DE_STOPWORDS,
    };
    COMMON_STOPWORDS.contains(&word) || extras.contains(&word)
}

/// Lowercased alphabetic words of at least 5 chars that are not stopwords,
/// first-occurrence order, at most 40.
pub fn extract_keywords(text: &str, lang: Language) -> Vec<String> {
    let candidates: Vec<String> = WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|w| w.chars().count() >= 5)
        .filter(|w| !is_stopword(w, lang))
        .collect();
    let mut keywords = unique_strings(candidates);
    keywords.truncate(40);
    keywords
}

/// Replace the first case-insensitive whole-word match of `word`.
/// Returns `text` unchanged when the word does not occur.
pub fn replace_first_word_ci(text: &str, word: &str, replacement: &str) -> String {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replacen(text, 1, NoExpand(replacement)).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Trim surrounding straight double quotes.
pub fn strip_quotes(s: &str) -> String {
    EDGE_QUOTES_RE.replace_all(s, "").trim().to_string()
}

/// Trim, then cut to `max_len` chars with a trailing ellipsis when longer.
pub fn truncate(s: &str, max_len: usize) -> String {
    let t = s.trim();
    if t.chars().count() <= max_len {
        return t.to_string();
    }
    let head: String = t.chars().take(max_len.saturating_sub(1)).collect();
    format!("{}…", head.trim())
}

/// First `n` space-separated words.
pub fn first_words(s: &str, n: usize) -> String {
    s.split(' ').take(n).collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Trimmed, non-empty, first occurrence wins.
pub fn unique_strings<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let k = item.as_ref().trim();
        if k.is_empty() || out.iter().any(|o| o == k) {
            continue;
        }
        out.push(k.to_string());
    }
    out
}

/// Generic distractor words for when a lesson has too few keywords.
pub fn fallback_distractors(lang: Language) -> &'static [&'static str] {
    match lang {
        Language::De => &[
            "Bewusstsein", "Realität", "Gedanke", "Geist", "Muster",
            "Erfahrung", "Prinzip", "Ursache", "Wirkung",
        ],
        Language::En => &[
            "consciousness", "reality", "thought", "mind", "pattern",
            "experience", "principle", "cause", "effect",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_ws("  a \n\t b  c "), "a b c");
    }

    #[test]
    fn sentences_split_on_terminators_and_keep_tail() {
        let s = split_sentences("One two. Three four! Five six? Trailing bit");
        assert_eq!(s, vec!["One two.", " Three four!", " Five six?", " Trailing bit"]);
    }

    #[test]
    fn qualifying_sentences_filters_by_length() {
        let text = "Short. This sentence is comfortably long enough to qualify here.";
        let s = qualifying_sentences(text, 25, 220);
        assert_eq!(s, vec!["This sentence is comfortably long enough to qualify here."]);
    }

    #[test]
    fn keywords_drop_stopwords_short_words_and_duplicates() {
        let kw = extract_keywords("Patterns repeat. Patterns should repeat on all scales.", Language::En);
        assert_eq!(kw, vec!["patterns", "repeat", "scales"]);
    }

    #[test]
    fn keywords_keep_german_umlauts() {
        let kw = extract_keywords("Die Größe der Realität können wir sehen.", Language::De);
        assert!(kw.contains(&"größe".to_string()));
        assert!(kw.contains(&"realität".to_string()));
        assert!(!kw.contains(&"können".to_string()));
    }

    #[test]
    fn replace_first_word_is_case_insensitive_and_whole_word() {
        let out = replace_first_word_ci("Mind over mind; mindful.", "mind", "_____");
        assert_eq!(out, "_____ over mind; mindful.");
        let unchanged = replace_first_word_ci("mindful", "mind", "_____");
        assert_eq!(unchanged, "mindful");
    }

    #[test]
    fn replacement_is_literal() {
        assert_eq!(replace_first_word_ci("pay cash", "cash", "$1"), "pay $1");
    }

    #[test]
    fn truncate_adds_ellipsis_only_when_needed() {
        assert_eq!(truncate("  short  ", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd…");
    }

    #[test]
    fn strip_quotes_and_first_words() {
        assert_eq!(strip_quotes("\"\"quoted\""), "quoted");
        assert_eq!(first_words("a b c d", 2), "a b");
    }

    #[test]
    fn unique_strings_trims_and_skips_empties() {
        assert_eq!(unique_strings([" a", "a ", "", "b"]), vec!["a", "b"]);
    }
}
