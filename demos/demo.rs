//! End-to-end walk through one learner's day.
//!
//! Run with: `cargo run --example demo`
//! (set `RUST_LOG=practice_drill_gen=debug` to see selection details)
//!
//! 1. **Lesson**: the first lesson is passed with 80%, which sets a mastery
//!    gate and blocks the next lesson.
//! 2. **Practice**: a seeded practice session is generated from the lesson
//!    text and the authored exercises, answered, and used to clear the gate.
//! 3. **Daily session**: a check-in plus a reflection, graded locally.
//! 4. **Persistence**: the final progress is written to an in-memory store
//!    and read back.
//!
//! The clock is fixed, so the output is identical on every run.

use chrono::{TimeZone, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use practice_drill_gen::{
    generate_practice, grade_reflection, Clock, Course, DailySessionOutcome, Exercise,
    ExerciseKind, FixedClock, Language, LessonAccess, LocalReflectionGrader, OutcomeCheckin,
    PracticeConfig, PracticeRequest, PracticeSession, Submission, UserProgress,
    storage::{MemoryStore, ProgressStore},
};

const COURSE_JSON: &str = include_str!("course_en.json");

fn banner(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn print_exercise(i: usize, ex: &Exercise) {
    println!("  {}. [{}] {}", i + 1, ex.exercise_type(), ex.prompt);
    for opt in ex.options() {
        println!("       - {opt}");
    }
    println!("       id: {}", ex.id);
}

/// The right answer, as the quiz runner would submit it.
fn correct_submission(ex: &Exercise) -> Submission {
    match &ex.kind {
        ExerciseKind::TrueFalse { answer, .. } => Submission::text(answer.to_string()),
        ExerciseKind::MultipleChoice { answer, .. }
        | ExerciseKind::Cloze { answer, .. }
        | ExerciseKind::Scenario { answer, .. } => Submission::text(answer.clone()),
        ExerciseKind::Sorting { order, .. } => Submission::Order(order.clone()),
        ExerciseKind::Reflection => Submission::text(""),
    }
}

fn main() -> practice_drill_gen::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "practice_drill_gen=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let course = Course::from_json_str(COURSE_JSON)?;
    let lang = Language::En;
    let config = PracticeConfig::default();
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 17, 9, 0, 0).unwrap());
    let now = clock.now();

    // 1. Lesson
    banner("Lesson");
    let mut progress = UserProgress::new_for(&course);
    progress = progress.complete_lesson(&course, "lesson_1_1", 80, lang, now);
    println!("  Completed lesson_1_1 with 80%  XP: {}  Gems: {}", progress.xp, progress.gems);
    let queued = progress.current_lesson_id.clone();
    match progress.lesson_access() {
        LessonAccess::Granted => println!("  Next lesson open"),
        LessonAccess::Gated { message } => println!("  Gate: {message}"),
        LessonAccess::OutOfHearts => println!("  Out of hearts"),
    }
    println!();

    // 2. Practice
    banner("Practice");
    let request = PracticeRequest::session(lang, now, &config);
    let exercises = generate_practice(&course, &progress, &request);
    for (i, ex) in exercises.iter().enumerate() {
        print_exercise(i, ex);
    }
    let mut session = PracticeSession::new(exercises, lang);
    for i in 0..session.len() {
        // Miss the last one.
        let sub = if i + 1 == session.len() {
            Submission::text("Call a friend to complain.")
        } else {
            correct_submission(&session.exercises()[i])
        };
        session.submit(i, &sub);
    }
    println!("\n  Correct: {}/{}", session.correct_count(), session.len());
    let outcome = session.finish();
    let done = progress.complete_practice(&outcome, queued.as_deref(), now);
    println!(
        "  Hearts +{}  XP +{}  Gems +{}  Gate cleared: {}  Resume: {}",
        outcome.hearts_earned,
        outcome.xp_earned,
        outcome.gems_earned,
        done.gate_cleared,
        done.resume_lesson.as_deref().unwrap_or("-"),
    );
    progress = done.progress;
    println!();

    // 3. Daily session
    banner("Daily session");
    let reflection = "My mood this morning shaped how the meeting went.";
    let feedback = grade_reflection(&LocalReflectionGrader, "What did you notice?", reflection, lang);
    println!("  Reflection score {} ({}): {}", feedback.score, feedback.is_pass, feedback.feedback);
    let daily = DailySessionOutcome::new(
        OutcomeCheckin::new(7, 4, 8),
        reflection,
        feedback.is_pass,
        Default::default(),
    );
    progress = progress.complete_daily_session(&daily, now);
    println!("  XP: {}  Gems: {}  Notes: {}", progress.xp, progress.gems, progress.memory_notes.len());
    println!();

    // 4. Persistence
    banner("Persistence");
    let store = MemoryStore::new();
    store.save(&progress);
    let reloaded = store.load();
    println!("  Round trip equal: {}", reloaded == progress);
    println!("  Tracked exercises: {}", reloaded.practice_stats.len());

    Ok(())
}
