//! Practice engine: exercise synthesis, practice selection and progress
//! bookkeeping.
//!
//! ## Module overview
//!
//! | Module         | Purpose |
//! |----------------|---------|
//! | `models`       | Course content, exercises and the persisted `UserProgress` |
//! | `history`      | Fixed-capacity ring used for check-ins and memory notes |
//! | `rng`          | FNV-1a string hashing and the seeded Mulberry32 generator |
//! | `text`         | Sentence splitting, keyword extraction, stopwords |
//! | `helpers`      | Id hashing, localized wording, cloning for practice |
//! | `synthesizers` | True/false, cloze and multiple-choice items from lesson text |
//! | `eligibility`  | Which lessons feed practice, and the per-day seed |
//! | `scoring`      | Recency/performance priority and cooldown |
//! | `generator`    | Entry point `generate_practice()`: pool, rank, walk, pad |
//! | `session`      | Answer collection and rewards for one practice run |
//! | `grading`      | Answer checking and reflection grading |
//! | `progress`     | Stats merge, mastery gate, lesson/practice/daily transitions |
//! | `config`       | Tuning constants with JSON overrides |
//! | `clock`        | Time source and UTC day keys |
//! | `error`        | `PracticeError` for the fallible edges |

pub mod clock;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod generator;
pub mod grading;
pub mod helpers;
pub mod history;
pub mod models;
pub mod progress;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod synthesizers;
pub mod text;

#[cfg(test)]
pub mod fixtures;

pub use clock::{day_key, Clock, FixedClock, SystemClock};
pub use config::PracticeConfig;
pub use error::{PracticeError, Result};
pub use generator::{generate_practice, generate_practice_with, select_exercises, PracticeRequest};
pub use grading::{
    check_answer, grade_reflection, parse_bool_answer, LocalReflectionGrader, ReflectionFeedback,
    ReflectionGrader, Submission,
};
pub use history::BoundedHistory;
pub use models::{
    Course, Exercise, ExerciseKind, ExerciseType, Language, Lesson, PracticeExerciseStats, Unit,
    UserProgress,
};
pub use progress::{
    is_gate_satisfied, merge_stats, DailySessionOutcome, LessonAccess, OutcomeCheckin,
    PracticeAnswers, PracticeCompletion, PracticeOutcome,
};
pub use session::PracticeSession;
