use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::practice_engine::{
    clock::Clock,
    config::PracticeConfig,
    eligibility::{eligible_lessons, selection_seed},
    helpers::clone_for_practice,
    models::{Course, Exercise, ExerciseType, Language, UserProgress},
    rng::{index, shuffled, unit, Mulberry32},
    scoring::{in_cooldown, practice_score},
    synthesizers::derive_lesson_exercises,
};

/// Exercise types the practice runner can render.
pub const PRACTICE_TYPES: [ExerciseType; 4] = [
    ExerciseType::MultipleChoice,
    ExerciseType::TrueFalse,
    ExerciseType::Cloze,
    ExerciseType::Scenario,
];

pub fn is_practice_type(t: ExerciseType) -> bool {
    PRACTICE_TYPES.contains(&t)
}

/// Everything that varies between two practice generations for one learner.
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeRequest {
    pub language: Language,
    pub count: usize,
    pub now: DateTime<Utc>,
}

impl PracticeRequest {
    pub fn new(language: Language, count: usize, now: DateTime<Utc>) -> Self {
        Self { language, count, now }
    }

    /// Request stamped with the clock's current time.
    pub fn from_clock(language: Language, count: usize, clock: &impl Clock) -> Self {
        Self::new(language, count, clock.now())
    }

    /// A standalone practice session of the configured size.
    pub fn session(language: Language, now: DateTime<Utc>, config: &PracticeConfig) -> Self {
        Self::new(language, config.session_size, now)
    }

    /// The practice block inside the daily session.
    pub fn daily(language: Language, now: DateTime<Utc>, config: &PracticeConfig) -> Self {
        Self::new(language, config.daily_session_size, now)
    }
}

/// `select(course, progress, language, count)` with default tuning.
pub fn select_exercises(
    course: &Course,
    progress: &UserProgress,
    language: Language,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Exercise> {
    generate_practice(course, progress, &PracticeRequest::new(language, count, now))
}

pub fn generate_practice(
    course: &Course,
    progress: &UserProgress,
    request: &PracticeRequest,
) -> Vec<Exercise> {
    generate_practice_with(course, progress, request, &PracticeConfig::default())
}

/// Core selection: build the candidate pool, rank it, walk it.
///
/// Output is a pure function of the inputs: the only randomness comes from a
/// [`Mulberry32`] seeded by [`selection_seed`].
pub fn generate_practice_with(
    course: &Course,
    progress: &UserProgress,
    request: &PracticeRequest,
    config: &PracticeConfig,
) -> Vec<Exercise> {
    let count = request.count;
    if count == 0 {
        return Vec::new();
    }
    let now = request.now;
    let stats = &progress.practice_stats;

    let eligible = eligible_lessons(course, progress);
    let seed = selection_seed(course, progress, request.language, &eligible, now);
    let mut rng = Mulberry32::from_seed_str(&seed);

    let lessons = shuffled(&eligible, &mut rng);

    let mut originals: Vec<Exercise> = Vec::new();
    for lesson in &lessons {
        let salt = format!("orig:{}", lesson.id);
        for ex in &lesson.exercises {
            let cloned = clone_for_practice(ex, &mut rng, &salt);
            if is_practice_type(cloned.exercise_type()) {
                originals.push(cloned);
            }
        }
    }

    let mut derived: Vec<Exercise> = Vec::new();
    for lesson in &lessons {
        derived.extend(derive_lesson_exercises(lesson, request.language, &mut rng, &seed, config));
    }

    // Rank: score plus a per-candidate jitter drawn once, stable sort.
    let mut ranked: Vec<(f64, Exercise)> = derived
        .into_iter()
        .chain(originals.iter().cloned())
        .filter(|ex| is_practice_type(ex.exercise_type()))
        .map(|ex| {
            let jitter = (unit(&mut rng) - 0.5) * config.jitter_span;
            (practice_score(&ex, stats, now, config) + jitter, ex)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    let pool: Vec<Exercise> = ranked.into_iter().map(|(_, ex)| ex).collect();

    let enforce_cooldown = pool.len() >= count.saturating_mul(2);
    let mut picked: Vec<Exercise> = Vec::with_capacity(count.min(pool.len()));
    let mut seen = HashSet::new();

    for ex in &pool {
        if picked.len() >= count {
            break;
        }
        if enforce_cooldown && in_cooldown(ex, stats, now, config) {
            continue;
        }
        if seen.insert(ex.dedup_key()) {
            picked.push(ex.clone());
        }
    }

    let walked = picked.len();

    // Padding: re-clone originals under fresh salts until the quota is met.
    // A re-clone keeps its prompt, so only originals whose key is still
    // unseen can contribute; stop once there are none.
    let mut open_keys: HashSet<_> = originals
        .iter()
        .map(Exercise::dedup_key)
        .filter(|key| !seen.contains(key))
        .collect();
    if picked.len() < count && !originals.is_empty() {
        let attempts = count.saturating_mul(config.padding_attempt_factor);
        for i in 0..attempts {
            if picked.len() >= count || open_keys.is_empty() {
                break;
            }
            let base = &originals[index(&mut rng, originals.len())];
            let extra = clone_for_practice(base, &mut rng, &format!("repeat:{}", i));
            let key = extra.dedup_key();
            if seen.insert(key.clone()) {
                open_keys.remove(&key);
                picked.push(extra);
            }
        }
    }

    debug!(
        pool = pool.len(),
        requested = count,
        walked,
        padded = picked.len() - walked,
        enforce_cooldown,
        "practice selection"
    );

    picked.truncate(count);
    picked
}
