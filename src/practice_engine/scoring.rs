//! Recency/performance priority of a practice candidate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::practice_engine::{
    config::PracticeConfig,
    helpers::base_exercise_id,
    models::{Exercise, PracticeExerciseStats},
};

/// Higher means "show sooner".
///
/// Unseen base exercises get the novelty bonus. Seen ones gain weight per
/// wrong answer, lose weight per consecutive correct answer, and gain up to
/// `recency_cap` as time since the last sighting grows.
pub fn practice_score(
    exercise: &Exercise,
    stats: &BTreeMap<String, PracticeExerciseStats>,
    now: DateTime<Utc>,
    config: &PracticeConfig,
) -> f64 {
    let mut score = config.base_score;

    let Some(s) = stats.get(base_exercise_id(&exercise.id)) else {
        return score + config.novelty_bonus;
    };

    score += f64::from(s.wrong_count) * config.wrong_weight;
    score -= f64::from(s.correct_streak) * config.streak_penalty;

    if let Some(last) = s.last_seen_at {
        let hours = ((now - last).num_milliseconds() as f64 / 3_600_000.0).max(0.0);
        score += (hours / config.recency_divisor_hours).min(config.recency_cap);
    }

    score
}

/// Whether the base exercise was seen less than the cooldown ago.
pub fn in_cooldown(
    exercise: &Exercise,
    stats: &BTreeMap<String, PracticeExerciseStats>,
    now: DateTime<Utc>,
    config: &PracticeConfig,
) -> bool {
    stats
        .get(base_exercise_id(&exercise.id))
        .and_then(|s| s.last_seen_at)
        .is_some_and(|last| now - last < config.cooldown())
}
