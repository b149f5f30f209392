//! Progress transitions: merging practice answers into statistics, the
//! mastery gate, and the reward bookkeeping around lessons, practice and the
//! daily session.
//!
//! Every transition takes `&self` and returns a new [`UserProgress`]; the
//! caller decides when to persist it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::practice_engine::{
    clock::day_key,
    config::PracticeConfig,
    helpers::localized,
    models::{
        ActiveGate, CompletedLesson, Course, GateKind, Language, OutcomeEntry,
        PracticeExerciseStats, UserProgress,
    },
};

/// Base exercise id → whether the last answer in the batch was correct.
pub type PracticeAnswers = BTreeMap<String, bool>;

/// XP for passing a lesson.
pub const LESSON_XP: u32 = 15;
pub const PERFECT_LESSON_GEMS: u32 = 5;
pub const LESSON_GEMS: u32 = 2;

// ---------------------------------------------------------------------------
// Stats merge and gate
// ---------------------------------------------------------------------------

/// Fold one batch of answers into the stats map.
///
/// Every answered id gets `seen_count + 1`, a correct or wrong tally, a
/// streak that grows on correct and resets on wrong, and `last_seen_at = now`
/// (one timestamp for the whole batch). Ids without prior stats start at zero.
pub fn merge_stats(
    existing: &BTreeMap<String, PracticeExerciseStats>,
    answers: &PracticeAnswers,
    now: DateTime<Utc>,
) -> BTreeMap<String, PracticeExerciseStats> {
    let mut next = existing.clone();
    for (id, &is_correct) in answers {
        let prev = next.get(id).copied().unwrap_or_default();
        next.insert(
            id.clone(),
            PracticeExerciseStats {
                seen_count: prev.seen_count.saturating_add(1),
                correct_count: prev.correct_count.saturating_add(u32::from(is_correct)),
                wrong_count: prev.wrong_count.saturating_add(u32::from(!is_correct)),
                correct_streak: if is_correct { prev.correct_streak.saturating_add(1) } else { 0 },
                last_seen_at: Some(now),
            },
        );
    }
    next
}

pub fn is_gate_satisfied(answers: &PracticeAnswers) -> bool {
    is_gate_satisfied_with(answers, &PracticeConfig::default())
}

/// At least `gate_min_answers` answers and a correct share of at least
/// `gate_pass_ratio`.
pub fn is_gate_satisfied_with(answers: &PracticeAnswers, config: &PracticeConfig) -> bool {
    if answers.len() < config.gate_min_answers || answers.is_empty() {
        return false;
    }
    let correct = answers.values().filter(|&&c| c).count();
    correct as f64 / answers.len() as f64 >= config.gate_pass_ratio
}

pub fn gate_message(lang: Language) -> String {
    localized(
        lang,
        "Mastery: Complete a short practice session (≥70% correct) to continue.",
        "Meisterschaft: Erst eine kurze Practice-Session (≥70% richtig), dann geht’s weiter.",
    )
}

// ---------------------------------------------------------------------------
// Session outcomes
// ---------------------------------------------------------------------------

/// What a finished practice session hands back to progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PracticeOutcome {
    pub hearts_earned: u32,
    pub xp_earned: u32,
    pub gems_earned: u32,
    pub answers: PracticeAnswers,
}

/// Result of [`UserProgress::complete_practice`].
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeCompletion {
    pub progress: UserProgress,
    /// A gate was active when the session started and this session cleared it
    pub gate_cleared: bool,
    /// Lesson to open next, when one was queued behind the cleared gate
    pub resume_lesson: Option<String>,
}

/// Self-reported check-in values for the daily session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeCheckin {
    pub clarity: u8,
    pub reactivity: u8,
    pub agency: u8,
}

impl OutcomeCheckin {
    /// Clamp every axis into 1..=10.
    pub fn new(clarity: u8, reactivity: u8, agency: u8) -> Self {
        Self {
            clarity: clarity.clamp(1, 10),
            reactivity: reactivity.clamp(1, 10),
            agency: agency.clamp(1, 10),
        }
    }
}

/// What a finished daily session hands back to progress.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySessionOutcome {
    pub xp_earned: u32,
    pub gems_earned: u32,
    pub checkin: OutcomeCheckin,
    pub reflection_text: String,
    pub practice_answers: PracticeAnswers,
}

pub const DAILY_XP: u32 = 25;
pub const DAILY_REFLECTION_GEMS: u32 = 2;

impl DailySessionOutcome {
    /// Standard daily rewards: 25 XP, plus 2 gems when the reflection passed.
    pub fn new(
        checkin: OutcomeCheckin,
        reflection_text: impl Into<String>,
        reflection_passed: bool,
        practice_answers: PracticeAnswers,
    ) -> Self {
        Self {
            xp_earned: DAILY_XP,
            gems_earned: if reflection_passed { DAILY_REFLECTION_GEMS } else { 0 },
            checkin,
            reflection_text: reflection_text.into(),
            practice_answers,
        }
    }
}

/// Whether a lesson may be opened right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonAccess {
    Granted,
    /// A practice gate is active; show `message` and offer practice
    Gated { message: String },
    /// No hearts left; route the learner into practice
    OutOfHearts,
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

impl UserProgress {
    /// Fresh progress with the cursor on the course's first lesson.
    pub fn new_for(course: &Course) -> Self {
        let mut progress = Self::default();
        if let Some((unit_id, lesson)) = course.first_lesson() {
            progress.current_unit_id = Some(unit_id.to_string());
            progress.current_lesson_id = Some(lesson.id.clone());
            progress.unlocked_units = vec![unit_id.to_string()];
        }
        progress
    }

    pub fn lesson_access(&self) -> LessonAccess {
        if let Some(gate) = &self.active_gate {
            return LessonAccess::Gated { message: gate.message.clone() };
        }
        if self.hearts == 0 {
            return LessonAccess::OutOfHearts;
        }
        LessonAccess::Granted
    }

    pub fn lose_heart(&self) -> Self {
        Self { hearts: self.hearts.saturating_sub(1), ..self.clone() }
    }

    fn add_hearts(&self, n: u32) -> u32 {
        self.hearts.saturating_add(n).min(self.max_hearts)
    }

    /// Bring a loaded blob back within its own bounds: hearts never exceed
    /// `max_hearts`.
    pub fn normalized(self) -> Self {
        let hearts = self.hearts.min(self.max_hearts);
        Self { hearts, ..self }
    }

    /// Record a passed lesson.
    ///
    /// The cursor moves to the next incomplete lesson but never behind the
    /// previous cursor (replaying an early lesson does not regress progress).
    /// A score below the mastery threshold sets a practice gate; otherwise any
    /// gate is cleared.
    pub fn complete_lesson(
        &self,
        course: &Course,
        lesson_id: &str,
        score_percent: u32,
        language: Language,
        now: DateTime<Utc>,
    ) -> Self {
        self.complete_lesson_with(course, lesson_id, score_percent, language, now, &PracticeConfig::default())
    }

    pub fn complete_lesson_with(
        &self,
        course: &Course,
        lesson_id: &str,
        score_percent: u32,
        language: Language,
        now: DateTime<Utc>,
        config: &PracticeConfig,
    ) -> Self {
        let mut next = self.clone();
        next.completed_lessons.insert(
            lesson_id.to_string(),
            CompletedLesson { score: score_percent, completed_at: now },
        );

        let candidate = course
            .next_incomplete_after(lesson_id, &next.completed_lessons)
            .map(|(unit_id, lesson)| (unit_id.to_string(), lesson.id.clone()));

        if let Some((unit_id, candidate_id)) = candidate {
            let prev_idx = self.current_lesson_id.as_deref().and_then(|id| course.lesson_index(id));
            let next_idx = course.lesson_index(&candidate_id);
            let regresses = matches!((prev_idx, next_idx), (Some(p), Some(n)) if n < p);
            if !regresses {
                if !next.unlocked_units.contains(&unit_id) {
                    next.unlocked_units.push(unit_id.clone());
                }
                next.current_unit_id = Some(unit_id);
                next.current_lesson_id = Some(candidate_id);
            }
        }

        next.xp = next.xp.saturating_add(LESSON_XP);
        next.gems = next
            .gems
            .saturating_add(if score_percent >= 100 { PERFECT_LESSON_GEMS } else { LESSON_GEMS });
        next.active_gate = (score_percent < config.mastery_score_percent).then(|| ActiveGate {
            kind: GateKind::Practice,
            message: gate_message(language),
            created_at: now,
        });
        next.last_active_date = Some(day_key(now));
        next
    }

    /// Apply a finished practice session.
    ///
    /// Gate satisfaction is judged against `self`, the state the session was
    /// started from, and the same verdict drives both the gate clearing and the
    /// resume decision.
    pub fn complete_practice(
        &self,
        outcome: &PracticeOutcome,
        queued_lesson: Option<&str>,
        now: DateTime<Utc>,
    ) -> PracticeCompletion {
        self.complete_practice_with(outcome, queued_lesson, now, &PracticeConfig::default())
    }

    pub fn complete_practice_with(
        &self,
        outcome: &PracticeOutcome,
        queued_lesson: Option<&str>,
        now: DateTime<Utc>,
        config: &PracticeConfig,
    ) -> PracticeCompletion {
        let gate_active = matches!(
            self.active_gate,
            Some(ActiveGate { kind: GateKind::Practice, .. })
        );
        let gate_cleared = gate_active && is_gate_satisfied_with(&outcome.answers, config);

        let mut next = self.clone();
        next.hearts = self.add_hearts(outcome.hearts_earned);
        next.xp = next.xp.saturating_add(outcome.xp_earned);
        next.gems = next.gems.saturating_add(outcome.gems_earned);
        next.practice_stats = merge_stats(&self.practice_stats, &outcome.answers, now);
        if gate_cleared {
            next.active_gate = None;
        }
        next.last_active_date = Some(day_key(now));

        PracticeCompletion {
            progress: next,
            gate_cleared,
            resume_lesson: queued_lesson.filter(|_| gate_cleared).map(str::to_string),
        }
    }

    /// Apply a finished daily session.
    pub fn complete_daily_session(&self, outcome: &DailySessionOutcome, now: DateTime<Utc>) -> Self {
        let today = day_key(now);
        let mut next = self.clone();
        next.xp = next.xp.saturating_add(outcome.xp_earned);
        next.gems = next.gems.saturating_add(outcome.gems_earned);
        next.last_daily_completed_date = Some(today.clone());
        next.last_active_date = Some(today.clone());
        next.outcome_history.push_replacing(
            OutcomeEntry {
                date: today.clone(),
                clarity: outcome.checkin.clarity,
                reactivity: outcome.checkin.reactivity,
                agency: outcome.checkin.agency,
            },
            |a, b| a.date == b.date,
        );
        next.practice_stats = merge_stats(&self.practice_stats, &outcome.practice_answers, now);
        next.memory_notes.push(format!("{}: {}", today, outcome.reflection_text));
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice_engine::fixtures::{course_en, noon};
    use chrono::Duration;

    fn answers(pairs: &[(&str, bool)]) -> PracticeAnswers {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    // ── stats merge ──────────────────────────────────────────────────────────

    #[test]
    fn merge_creates_and_updates_counters() {
        let first = merge_stats(&BTreeMap::new(), &answers(&[("a", true), ("b", false)]), noon());
        assert_eq!(first["a"].seen_count, 1);
        assert_eq!(first["a"].correct_count, 1);
        assert_eq!(first["a"].correct_streak, 1);
        assert_eq!(first["b"].wrong_count, 1);
        assert_eq!(first["b"].correct_streak, 0);
        assert_eq!(first["b"].last_seen_at, Some(noon()));

        let later = noon() + Duration::hours(1);
        let second = merge_stats(&first, &answers(&[("a", true)]), later);
        assert_eq!(second["a"].seen_count, 2);
        assert_eq!(second["a"].correct_streak, 2);
        assert_eq!(second["a"].last_seen_at, Some(later));
        assert_eq!(second["b"], first["b"], "unanswered ids are untouched");

        let third = merge_stats(&second, &answers(&[("a", false)]), later);
        assert_eq!(third["a"].correct_streak, 0);
        assert_eq!(third["a"].wrong_count, 1);
    }

    #[test]
    fn merge_of_disjoint_batches_equals_merge_of_union() {
        let a1 = answers(&[("a", true), ("b", false)]);
        let a2 = answers(&[("c", true), ("d", true)]);
        let union: PracticeAnswers = a1.iter().chain(a2.iter()).map(|(k, v)| (k.clone(), *v)).collect();
        let stepwise = merge_stats(&merge_stats(&BTreeMap::new(), &a1, noon()), &a2, noon());
        let at_once = merge_stats(&BTreeMap::new(), &union, noon());
        assert_eq!(stepwise, at_once);
    }

    #[test]
    fn merge_does_not_touch_input() {
        let existing = merge_stats(&BTreeMap::new(), &answers(&[("a", true)]), noon());
        let snapshot = existing.clone();
        let _ = merge_stats(&existing, &answers(&[("a", false)]), noon());
        assert_eq!(existing, snapshot);
    }

    #[test]
    fn merge_counters_saturate() {
        let full = PracticeExerciseStats {
            seen_count: u32::MAX,
            correct_count: u32::MAX,
            wrong_count: u32::MAX,
            correct_streak: u32::MAX,
            last_seen_at: None,
        };
        let existing = BTreeMap::from([("a".to_string(), full.clone())]);
        let right = merge_stats(&existing, &answers(&[("a", true)]), noon());
        assert_eq!(right["a"].seen_count, u32::MAX);
        assert_eq!(right["a"].correct_count, u32::MAX);
        assert_eq!(right["a"].correct_streak, u32::MAX);
        let wrong = merge_stats(&existing, &answers(&[("a", false)]), noon());
        assert_eq!(wrong["a"].wrong_count, u32::MAX);
        assert_eq!(wrong["a"].correct_streak, 0);
    }

    // ── gate ─────────────────────────────────────────────────────────────────

    #[test]
    fn gate_threshold() {
        let sixty = answers(&[("1", true), ("2", true), ("3", true), ("4", false), ("5", false)]);
        let eighty = answers(&[("1", true), ("2", true), ("3", true), ("4", true), ("5", false)]);
        let too_few = answers(&[("1", true), ("2", true), ("3", true), ("4", true)]);
        assert!(!is_gate_satisfied(&sixty));
        assert!(is_gate_satisfied(&eighty));
        assert!(!is_gate_satisfied(&too_few));
        assert!(!is_gate_satisfied(&PracticeAnswers::new()));
    }

    #[test]
    fn gate_accepts_exactly_seventy_percent() {
        let ten: PracticeAnswers = (0..10).map(|i| (format!("e{i}"), i < 7)).collect();
        assert!(is_gate_satisfied(&ten));
    }

    // ── lessons ──────────────────────────────────────────────────────────────

    #[test]
    fn new_progress_starts_at_first_lesson() {
        let p = UserProgress::new_for(&course_en());
        assert_eq!(p.current_lesson_id.as_deref(), Some("lesson_1_1"));
        assert_eq!(p.current_unit_id.as_deref(), Some("unit_1"));
        assert_eq!(p.unlocked_units, vec!["unit_1"]);
    }

    #[test]
    fn low_score_sets_gate_and_advances_cursor() {
        let course = course_en();
        let p = UserProgress::new_for(&course).complete_lesson(&course, "lesson_1_1", 80, Language::En, noon());
        assert_eq!(p.xp, 15);
        assert_eq!(p.gems, 2);
        assert_eq!(p.current_lesson_id.as_deref(), Some("lesson_1_2"));
        assert!(p.active_gate.is_some());
        assert!(matches!(p.lesson_access(), LessonAccess::Gated { .. }));
    }

    #[test]
    fn perfect_score_gives_bonus_gems_and_no_gate() {
        let course = course_en();
        let p = UserProgress::new_for(&course).complete_lesson(&course, "lesson_1_1", 100, Language::En, noon());
        assert_eq!(p.gems, 5);
        assert!(p.active_gate.is_none());
        assert_eq!(p.lesson_access(), LessonAccess::Granted);
    }

    #[test]
    fn replaying_an_early_lesson_does_not_regress_cursor() {
        let course = course_en();
        let mut p = UserProgress::new_for(&course);
        p = p.complete_lesson(&course, "lesson_1_1", 100, Language::En, noon());
        p = p.complete_lesson(&course, "lesson_1_2", 100, Language::En, noon());
        assert_eq!(p.current_lesson_id.as_deref(), Some("lesson_1_3"));

        // Uncomplete 1_2 artificially so the next candidate after 1_1 lies behind the cursor.
        p.completed_lessons.remove("lesson_1_2");
        let replay = p.complete_lesson(&course, "lesson_1_1", 100, Language::En, noon());
        assert_eq!(replay.current_lesson_id.as_deref(), Some("lesson_1_3"));
    }

    #[test]
    fn last_lesson_keeps_cursor() {
        let course = course_en();
        let mut p = UserProgress::new_for(&course);
        for id in ["lesson_1_1", "lesson_1_2", "lesson_1_3"] {
            p = p.complete_lesson(&course, id, 95, Language::En, noon());
        }
        assert_eq!(p.current_lesson_id.as_deref(), Some("lesson_1_3"));
        assert_eq!(p.completed_lessons.len(), 3);
    }

    #[test]
    fn hearts_never_go_below_zero() {
        let mut p = UserProgress { hearts: 1, ..Default::default() };
        p = p.lose_heart();
        assert_eq!(p.hearts, 0);
        assert_eq!(p.lesson_access(), LessonAccess::OutOfHearts);
        assert_eq!(p.lose_heart().hearts, 0);
    }

    // ── practice completion ──────────────────────────────────────────────────

    fn gated() -> UserProgress {
        UserProgress {
            hearts: 4,
            active_gate: Some(ActiveGate {
                kind: GateKind::Practice,
                message: gate_message(Language::En),
                created_at: noon(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn passing_practice_clears_gate_and_resumes_queued_lesson() {
        let outcome = PracticeOutcome {
            hearts_earned: 1,
            xp_earned: 10,
            gems_earned: 1,
            answers: answers(&[("1", true), ("2", true), ("3", true), ("4", true), ("5", false)]),
        };
        let done = gated().complete_practice(&outcome, Some("lesson_1_2"), noon());
        assert!(done.gate_cleared);
        assert!(done.progress.active_gate.is_none());
        assert_eq!(done.resume_lesson.as_deref(), Some("lesson_1_2"));
        assert_eq!(done.progress.hearts, 5);
        assert_eq!(done.progress.practice_stats.len(), 5);
    }

    #[test]
    fn failing_practice_keeps_gate() {
        let outcome = PracticeOutcome {
            answers: answers(&[("1", true), ("2", false), ("3", false), ("4", false), ("5", false)]),
            ..Default::default()
        };
        let done = gated().complete_practice(&outcome, Some("lesson_1_2"), noon());
        assert!(!done.gate_cleared);
        assert!(done.progress.active_gate.is_some());
        assert_eq!(done.resume_lesson, None);
    }

    #[test]
    fn practice_without_gate_never_resumes() {
        let outcome = PracticeOutcome {
            answers: answers(&[("1", true), ("2", true), ("3", true), ("4", true), ("5", true)]),
            ..Default::default()
        };
        let done = UserProgress::default().complete_practice(&outcome, Some("x"), noon());
        assert!(!done.gate_cleared);
        assert_eq!(done.resume_lesson, None);
    }

    #[test]
    fn hearts_are_clamped_to_max() {
        let outcome = PracticeOutcome { hearts_earned: 3, ..Default::default() };
        let done = gated().complete_practice(&outcome, None, noon());
        assert_eq!(done.progress.hearts, 5);
    }

    // ── daily session ────────────────────────────────────────────────────────

    #[test]
    fn daily_session_upserts_checkin_and_appends_note() {
        let outcome = DailySessionOutcome::new(
            OutcomeCheckin::new(7, 0, 12),
            "I own my reaction.",
            true,
            answers(&[("ex_1", true)]),
        );
        let once = UserProgress::default().complete_daily_session(&outcome, noon());
        let twice = once.complete_daily_session(&outcome, noon() + Duration::hours(1));

        assert_eq!(twice.outcome_history.len(), 1, "same day replaces the entry");
        let entry = twice.outcome_history.latest().unwrap();
        assert_eq!((entry.clarity, entry.reactivity, entry.agency), (7, 1, 10));
        assert_eq!(twice.memory_notes.len(), 2);
        assert_eq!(
            twice.memory_notes.latest().map(String::as_str),
            Some("2024-05-17: I own my reaction.")
        );
        assert_eq!(twice.xp, 50);
        assert_eq!(twice.gems, 4);
        assert_eq!(twice.last_daily_completed_date.as_deref(), Some("2024-05-17"));
        assert_eq!(twice.practice_stats["ex_1"].seen_count, 2);
    }

    #[test]
    fn history_rings_stay_bounded() {
        let mut p = UserProgress::default();
        for day in 0..80 {
            let outcome = DailySessionOutcome::new(
                OutcomeCheckin::new(5, 5, 5),
                format!("note {day}"),
                false,
                PracticeAnswers::new(),
            );
            p = p.complete_daily_session(&outcome, noon() + Duration::days(day));
        }
        assert_eq!(p.outcome_history.len(), 60);
        assert_eq!(p.memory_notes.len(), 25);
        assert!(p.memory_notes.latest().unwrap().ends_with("note 79"));
        assert_eq!(p.gems, 0);
    }

    // ── bounds ───────────────────────────────────────────────────────────────

    #[test]
    fn rewards_saturate_at_the_top() {
        let course = course_en();
        let rich = UserProgress { xp: u32::MAX, gems: u32::MAX, ..UserProgress::new_for(&course) };

        let lesson = rich.complete_lesson(&course, "lesson_1_1", 100, Language::En, noon());
        assert_eq!((lesson.xp, lesson.gems), (u32::MAX, u32::MAX));

        let outcome = PracticeOutcome { xp_earned: 10, gems_earned: 1, ..Default::default() };
        let practice = rich.complete_practice(&outcome, None, noon()).progress;
        assert_eq!((practice.xp, practice.gems), (u32::MAX, u32::MAX));

        let daily = DailySessionOutcome::new(
            OutcomeCheckin::new(5, 5, 5),
            "steady",
            true,
            PracticeAnswers::new(),
        );
        let day = rich.complete_daily_session(&daily, noon());
        assert_eq!((day.xp, day.gems), (u32::MAX, u32::MAX));
    }

    #[test]
    fn normalized_clamps_hearts_to_max() {
        let over = UserProgress { hearts: 9, max_hearts: 5, ..Default::default() };
        assert_eq!(over.normalized().hearts, 5);
        let under = UserProgress { hearts: 2, max_hearts: 5, ..Default::default() };
        assert_eq!(under.clone().normalized(), under);
    }
}
