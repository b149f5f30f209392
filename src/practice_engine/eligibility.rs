//! Which lessons may feed practice, and the seed string for one generation.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::practice_engine::{
    clock::day_key,
    models::{Course, Language, Lesson, UserProgress},
    rng::digest,
};

/// The current lesson plus every completed lesson, in course order.
///
/// Falls back to the whole course when that set matches nothing, so a
/// brand-new learner still gets practice material.
pub fn eligible_lessons<'c>(course: &'c Course, progress: &UserProgress) -> Vec<&'c Lesson> {
    let ids = progress_lesson_ids(progress);
    let all = course.ordered_lessons();
    let eligible: Vec<&Lesson> = all
        .iter()
        .copied()
        .filter(|l| ids.contains(l.id.as_str()))
        .collect();
    if eligible.is_empty() {
        all
    } else {
        eligible
    }
}

/// `{current lesson} ∪ completed lessons`, sorted, empties dropped.
fn progress_lesson_ids(progress: &UserProgress) -> BTreeSet<&str> {
    progress
        .current_lesson_id
        .iter()
        .map(String::as_str)
        .chain(progress.completed_lessons.keys().map(String::as_str))
        .filter(|id| !id.is_empty())
        .collect()
}

/// `"<day>|xp:<xp>|lessons:<digest>"`; changes whenever the day, XP or
/// lesson set changes.
pub fn progress_seed(progress: &UserProgress, now: DateTime<Utc>) -> String {
    let ids: Vec<&str> = progress_lesson_ids(progress).into_iter().collect();
    format!(
        "{}|xp:{}|lessons:{}",
        day_key(now),
        progress.xp,
        digest(&ids.join(","))
    )
}

/// Full seed string for one practice generation.
pub fn selection_seed(
    course: &Course,
    progress: &UserProgress,
    language: Language,
    eligible: &[&Lesson],
    now: DateTime<Utc>,
) -> String {
    let mut eligible_ids: Vec<&str> = eligible.iter().map(|l| l.id.as_str()).collect();
    eligible_ids.sort_unstable();
    format!(
        "{}|course:{}|lang:{}|eligible:{}",
        progress_seed(progress, now),
        course.id,
        language.code(),
        digest(&eligible_ids.join(","))
    )
}
