//! A running practice session: the selected exercises plus the learner's
//! answers so far.

use crate::practice_engine::{
    config::PracticeConfig,
    grading::{check_answer, Submission},
    helpers::base_exercise_id,
    models::{Exercise, Language},
    progress::{PracticeAnswers, PracticeOutcome},
};

pub const PRACTICE_XP: u32 = 10;
pub const PRACTICE_HEART_GEMS: u32 = 1;

#[derive(Debug, Clone)]
pub struct PracticeSession {
    exercises: Vec<Exercise>,
    language: Language,
    answers: PracticeAnswers,
    /// One graded result per exercise index
    results: Vec<Option<bool>>,
}

impl PracticeSession {
    pub fn new(exercises: Vec<Exercise>, language: Language) -> Self {
        let results = vec![None; exercises.len()];
        Self { exercises, language, answers: PracticeAnswers::new(), results }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Check `submission` against the exercise at `index` and record it.
    ///
    /// Each step takes one answer. Returns `None` for an out-of-range index,
    /// an already answered step, or an answer that cannot be graded; nothing
    /// is recorded in those cases. When two steps share a base exercise the
    /// later answer wins in [`answers`](Self::answers).
    pub fn submit(&mut self, index: usize, submission: &Submission) -> Option<bool> {
        if self.results.get(index)?.is_some() {
            return None;
        }
        let exercise = self.exercises.get(index)?;
        let is_correct = check_answer(exercise, submission, self.language)?;
        self.answers.insert(base_exercise_id(&exercise.id).to_string(), is_correct);
        self.results[index] = Some(is_correct);
        Some(is_correct)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        matches!(self.results.get(index), Some(Some(_)))
    }

    pub fn answered_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_some()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| **r == Some(true)).count()
    }

    pub fn answers(&self) -> &PracticeAnswers {
        &self.answers
    }

    pub fn finish(self) -> PracticeOutcome {
        self.finish_with(&PracticeConfig::default())
    }

    /// One heart when at least `ceil(heart_ratio × len)` answers were correct,
    /// a flat XP award, and a gem alongside the heart.
    pub fn finish_with(self, config: &PracticeConfig) -> PracticeOutcome {
        let needed = (self.exercises.len() as f64 * config.heart_ratio).ceil() as usize;
        let heart = !self.exercises.is_empty() && self.correct_count() >= needed;
        PracticeOutcome {
            hearts_earned: u32::from(heart),
            xp_earned: PRACTICE_XP,
            gems_earned: if heart { PRACTICE_HEART_GEMS } else { 0 },
            answers: self.answers,
        }
    }
}
