use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::practice_engine::error::Result;
use crate::practice_engine::history::BoundedHistory;
use crate::practice_engine::text::normalize_ws;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    De,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Exercises
// ---------------------------------------------------------------------------

/// Discriminant of an [`ExerciseKind`], used for whitelisting and dedup keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseType {
    MultipleChoice,
    TrueFalse,
    Sorting,
    Cloze,
    Scenario,
    Reflection,
}

impl ExerciseType {
    pub fn tag(self) -> &'static str {
        match self {
            ExerciseType::MultipleChoice => "MULTIPLE_CHOICE",
            ExerciseType::TrueFalse      => "TRUE_FALSE",
            ExerciseType::Sorting        => "SORTING",
            ExerciseType::Cloze          => "CLOZE",
            ExerciseType::Scenario       => "SCENARIO",
            ExerciseType::Reflection     => "REFLECTION",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExerciseType::MultipleChoice => "Multiple Choice",
            ExerciseType::TrueFalse      => "True / False",
            ExerciseType::Sorting        => "Sorting",
            ExerciseType::Cloze          => "Cloze",
            ExerciseType::Scenario       => "Scenario",
            ExerciseType::Reflection     => "Reflection",
        };
        write!(f, "{}", s)
    }
}

/// The type-specific payload of an exercise.
///
/// The shape of the correct answer depends on the variant: a boolean for
/// true/false, an ordered list for sorting, a single option string for the
/// choice-style variants, and nothing for free-text reflections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseKind {
    MultipleChoice {
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        answer: String,
    },
    TrueFalse {
        #[serde(default)]
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        answer: bool,
    },
    Sorting {
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        order: Vec<String>,
    },
    Cloze {
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        answer: String,
    },
    Scenario {
        options: Vec<String>,
        #[serde(rename = "correctAnswer")]
        answer: String,
    },
    Reflection,
}

impl ExerciseKind {
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExerciseKind::MultipleChoice { .. } => ExerciseType::MultipleChoice,
            ExerciseKind::TrueFalse { .. }      => ExerciseType::TrueFalse,
            ExerciseKind::Sorting { .. }        => ExerciseType::Sorting,
            ExerciseKind::Cloze { .. }          => ExerciseType::Cloze,
            ExerciseKind::Scenario { .. }       => ExerciseType::Scenario,
            ExerciseKind::Reflection            => ExerciseType::Reflection,
        }
    }

    pub fn options(&self) -> &[String] {
        match self {
            ExerciseKind::MultipleChoice { options, .. }
            | ExerciseKind::TrueFalse { options, .. }
            | ExerciseKind::Sorting { options, .. }
            | ExerciseKind::Cloze { options, .. }
            | ExerciseKind::Scenario { options, .. } => options,
            ExerciseKind::Reflection => &[],
        }
    }

    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            ExerciseKind::MultipleChoice { options, .. }
            | ExerciseKind::TrueFalse { options, .. }
            | ExerciseKind::Sorting { options, .. }
            | ExerciseKind::Cloze { options, .. }
            | ExerciseKind::Scenario { options, .. } => Some(options),
            ExerciseKind::Reflection => None,
        }
    }
}

/// One gradable quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: ExerciseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub points: u32,
}

impl Exercise {
    pub fn exercise_type(&self) -> ExerciseType {
        self.kind.exercise_type()
    }

    pub fn options(&self) -> &[String] {
        self.kind.options()
    }

    /// `(type, whitespace-normalized prompt)`; two exercises with the same
    /// key are the same question for the learner.
    pub fn dedup_key(&self) -> (ExerciseType, String) {
        (self.exercise_type(), normalize_ws(&self.prompt))
    }
}

// ---------------------------------------------------------------------------
// Course content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub required_score_percent: u32,
}

impl Lesson {
    /// Narrative prose used as the source for derived exercises.
    pub fn narrative_text(&self) -> String {
        let parts = [
            Some(self.description.as_str()),
            self.intro_text.as_deref(),
            self.interpretation.as_deref(),
            self.quote.as_ref().map(|q| q.text.as_str()),
        ];
        let joined = parts
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        normalize_ws(&joined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub order: i32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Course {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Units sorted by `order`, then their lessons in authored order.
    pub fn ordered_lessons(&self) -> Vec<&Lesson> {
        let mut units: Vec<&Unit> = self.units.iter().collect();
        units.sort_by_key(|u| u.order);
        units.into_iter().flat_map(|u| u.lessons.iter()).collect()
    }

    /// Same walk as [`Course::ordered_lessons`], paired with the owning unit id.
    pub fn ordered_lessons_with_unit(&self) -> Vec<(&str, &Lesson)> {
        let mut units: Vec<&Unit> = self.units.iter().collect();
        units.sort_by_key(|u| u.order);
        units
            .into_iter()
            .flat_map(|u| u.lessons.iter().map(move |l| (u.id.as_str(), l)))
            .collect()
    }

    pub fn first_lesson(&self) -> Option<(&str, &Lesson)> {
        self.ordered_lessons_with_unit().into_iter().next()
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.units
            .iter()
            .flat_map(|u| u.lessons.iter())
            .find(|l| l.id == lesson_id)
    }

    pub fn lesson_index(&self, lesson_id: &str) -> Option<usize> {
        self.ordered_lessons().iter().position(|l| l.id == lesson_id)
    }

    /// First lesson after `lesson_id` (in course order) that is not in `completed`.
    pub fn next_incomplete_after(
        &self,
        lesson_id: &str,
        completed: &BTreeMap<String, CompletedLesson>,
    ) -> Option<(&str, &Lesson)> {
        let ordered = self.ordered_lessons_with_unit();
        let start = ordered
            .iter()
            .position(|(_, l)| l.id == lesson_id)
            .map_or(0, |i| i + 1);
        ordered
            .into_iter()
            .skip(start)
            .find(|(_, l)| !completed.contains_key(&l.id))
    }
}

// ---------------------------------------------------------------------------
// User progress
// ---------------------------------------------------------------------------

pub const OUTCOME_HISTORY_LEN: usize = 60;
pub const MEMORY_NOTES_LEN: usize = 25;

/// Per base-exercise practice counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeExerciseStats {
    pub seen_count: u32,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub correct_streak: u32,
    pub last_seen_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedLesson {
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

/// A self-reported daily check-in, each axis on a 1–10 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    /// `YYYY-MM-DD` (UTC)
    pub date: String,
    pub clarity: u8,
    pub reactivity: u8,
    pub agency: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    Practice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGate {
    #[serde(rename = "type")]
    pub kind: GateKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// The single persisted root of a learner's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProgress {
    pub language: Language,
    pub hearts: u32,
    pub max_hearts: u32,
    pub streak: u32,
    pub xp: u32,
    pub gems: u32,
    pub last_active_date: Option<String>,
    pub completed_lessons: BTreeMap<String, CompletedLesson>,
    pub unlocked_units: Vec<String>,
    pub current_unit_id: Option<String>,
    pub current_lesson_id: Option<String>,
    pub memory_notes: BoundedHistory<String, MEMORY_NOTES_LEN>,
    pub practice_stats: BTreeMap<String, PracticeExerciseStats>,
    pub outcome_history: BoundedHistory<OutcomeEntry, OUTCOME_HISTORY_LEN>,
    pub last_daily_completed_date: Option<String>,
    pub active_gate: Option<ActiveGate>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            language: Language::default(),
            hearts: 5,
            max_hearts: 5,
            streak: 0,
            xp: 0,
            gems: 0,
            last_active_date: None,
            completed_lessons: BTreeMap::new(),
            unlocked_units: Vec::new(),
            current_unit_id: None,
            current_lesson_id: None,
            memory_notes: BoundedHistory::new(),
            practice_stats: BTreeMap::new(),
            outcome_history: BoundedHistory::new(),
            last_daily_completed_date: None,
            active_gate: None,
        }
    }
}
