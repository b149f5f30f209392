//! Tuning knobs for selection, gating and rewards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::practice_engine::error::{PracticeError, Result};

/// Every constant the practice engine uses. Partial JSON is accepted;
/// missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    /// Items in a regular practice session
    pub session_size: usize,
    /// Items in the practice step of the daily session
    pub daily_session_size: usize,

    /// Sentence length window (chars) for derivation sources
    pub min_sentence_chars: usize,
    pub max_sentence_chars: usize,
    /// Derived exercises kept per lesson
    pub max_derived_per_lesson: usize,
    /// Probability that a true/false item is negated
    pub negation_probability: f64,

    pub base_score: f64,
    /// Bonus for base exercises without any stats yet
    pub novelty_bonus: f64,
    pub wrong_weight: f64,
    pub streak_penalty: f64,
    pub recency_cap: f64,
    pub recency_divisor_hours: f64,
    /// Full width of the seeded tie-break jitter, centred on zero
    pub jitter_span: f64,

    pub cooldown_minutes: i64,
    /// Padding attempts per requested item
    pub padding_attempt_factor: usize,

    pub gate_min_answers: usize,
    pub gate_pass_ratio: f64,
    /// Score below which a completed lesson sets a practice gate
    pub mastery_score_percent: u32,

    /// Fraction of correct answers that earns a heart in practice
    pub heart_ratio: f64,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            session_size: 7,
            daily_session_size: 3,
            min_sentence_chars: 25,
            max_sentence_chars: 220,
            max_derived_per_lesson: 3,
            negation_probability: 0.45,
            base_score: 1.0,
            novelty_bonus: 2.5,
            wrong_weight: 2.0,
            streak_penalty: 1.25,
            recency_cap: 3.0,
            recency_divisor_hours: 12.0,
            jitter_span: 0.25,
            cooldown_minutes: 30,
            padding_attempt_factor: 10,
            gate_min_answers: 5,
            gate_pass_ratio: 0.70,
            mastery_score_percent: 90,
            heart_ratio: 0.6,
        }
    }
}

impl PracticeConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| PracticeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn cooldown(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.cooldown_minutes)
    }
}
