use once_cell::sync::Lazy;
use rand::RngCore;
use regex::Regex;

use crate::practice_engine::{
    helpers::{derived, derived_id, localized},
    models::{Exercise, ExerciseKind, Language},
    rng::unit,
    text::normalize_ws,
};

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-–•]\s*").unwrap());
static TRAILING_DOTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.+$").unwrap());
static EN_COPULA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s(is|are)\s").unwrap());
static DE_COPULA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s(ist|sind)\s").unwrap());

/// A statement shown to the learner plus its truth value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub answer: bool,
    pub explanation: String,
}

/// Turn `sentence` into a true statement, or a false one when `negated`.
///
/// Negation flips the first standalone copula (`is`/`are`, `ist`/`sind`) to
/// its negated form; sentences without one get a `NOT:` prefix. The
/// explanation always quotes the original sentence.
pub fn negate_statement(sentence: &str, lang: Language, negated: bool) -> Statement {
    let base = normalize_ws(sentence);
    let base = TRAILING_DOTS_RE.replace(&base, "").into_owned();

    if !negated {
        return Statement {
            text: format!("{}.", base),
            answer: true,
            explanation: localized(
                lang,
                format!("This statement is taken directly from the lesson: \"{}.\"", base),
                format!("Diese Aussage stammt direkt aus dem Lektionstext: „{}.“", base),
            ),
        };
    }

    let re = match lang {
        Language::En => &*EN_COPULA_RE,
        Language::De => &*DE_COPULA_RE,
    };
    let text = match re.captures(&base) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0..0, |m| m.range());
            let verb = caps[1].to_lowercase();
            let not = localized(lang, "not", "nicht");
            format!("{} {} {} {}.", &base[..whole.start], verb, not, &base[whole.end..])
        }
        None => format!("NOT: {}.", base),
    };

    Statement {
        text,
        answer: false,
        explanation: localized(
            lang,
            format!("The lesson implies: \"{}.\"", base),
            format!("Im Text heißt es sinngemäß: „{}.“", base),
        ),
    }
}

pub fn generate<R: RngCore + ?Sized>(
    sentence: &str,
    lang: Language,
    salt: &str,
    rng: &mut R,
    negation_probability: f64,
) -> Option<Exercise> {
    let cleaned = normalize_ws(sentence);
    let cleaned = BULLET_RE.replace(&cleaned, "").into_owned();
    if cleaned.chars().count() < 20 {
        return None;
    }

    let negated = unit(rng) < negation_probability;
    let statement = negate_statement(&cleaned, lang, negated);

    let prompt = localized(
        lang,
        format!("True or False: {}", statement.text),
        format!("Wahr oder Falsch: {}", statement.text),
    );
    let options = match lang {
        Language::En => vec!["True".to_string(), "False".to_string()],
        Language::De => vec!["Wahr".to_string(), "Falsch".to_string()],
    };

    Some(derived(
        derived_id("derived_tf", &[salt, "tf", &prompt]),
        prompt,
        ExerciseKind::TrueFalse { options, answer: statement.answer },
        statement.explanation,
    ))
}
