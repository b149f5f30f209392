//! # practice_drill_gen
//!
//! A fully offline, deterministic practice-exercise generator for a gamified
//! micro-learning course.
//!
//! Given a course and a learner's progress, the engine builds a short practice
//! session from the learner's lessons: the authored exercises (reshuffled) plus
//! true/false, cloze and multiple-choice items synthesized from the lesson
//! text. Candidates are ranked by how much the learner needs them, recently
//! seen items cool down, and the whole session is reproducible for the same
//! day and progress.
//!
//! ## How it works
//!
//! 1. Build a [`PracticeRequest`] with a language, a count and the current
//!    time (or use [`select_exercises`]).
//! 2. Call [`generate_practice`]: the engine picks the eligible lessons,
//!    derives a seed from the day and progress, clones and synthesizes
//!    candidates, ranks them, and walks the ranking with cooldown and
//!    duplicate checks.
//! 3. Run the exercises through a [`PracticeSession`], then fold the
//!    [`PracticeOutcome`] into progress with [`UserProgress::complete_practice`].
//!
//! ## Key features
//!
//! - **Deterministic**: same course, progress, language and UTC day give the
//!   same exercises, ids and option order.
//! - **Stable ids**: practice copies are `<base>__practice__<hash>`, so answer
//!   statistics always land on the authored exercise.
//! - **Mastery gate**: a lesson passed below 90% blocks the next one until a
//!   practice session reaches 70%.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::Utc;
//! use practice_drill_gen::{select_exercises, Course, Language, UserProgress};
//!
//! let course = Course::from_json_str(r#"{
//!     "id": "c", "title": "Course",
//!     "units": [{ "id": "u", "title": "Unit", "order": 1, "lessons": [{
//!         "id": "l1", "title": "Lesson",
//!         "description": "Attention is the lever of change in every habit you keep.",
//!         "exercises": [{
//!             "id": "ex_1", "type": "MULTIPLE_CHOICE", "prompt": "What is the lever?",
//!             "options": ["Attention", "Luck"], "correctAnswer": "Attention", "points": 10
//!         }]
//!     }]}]
//! }"#).unwrap();
//!
//! let progress = UserProgress::new_for(&course);
//! for ex in select_exercises(&course, &progress, Language::En, 3, Utc::now()) {
//!     println!("[{}] {}", ex.exercise_type(), ex.prompt);
//! }
//! ```

pub mod practice_engine;
pub mod storage;

pub use practice_engine::{
    check_answer, day_key, generate_practice, generate_practice_with, grade_reflection,
    is_gate_satisfied, merge_stats, parse_bool_answer, select_exercises, BoundedHistory, Clock,
    Course, DailySessionOutcome, Exercise, ExerciseKind, ExerciseType, FixedClock, Language,
    Lesson, LessonAccess, LocalReflectionGrader, OutcomeCheckin, PracticeAnswers,
    PracticeCompletion, PracticeConfig, PracticeError, PracticeExerciseStats, PracticeOutcome,
    PracticeRequest, PracticeSession, ReflectionFeedback, ReflectionGrader, Result, Submission,
    SystemClock, Unit, UserProgress,
};
