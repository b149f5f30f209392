//! Error types for the fallible edges: content, configuration, persistence
//! and reflection grading. The practice core itself never fails.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PracticeError {
    /// A file could not be read
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file or directory could not be written
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote reflection grader did not produce a verdict
    #[error("reflection grading unavailable: {0}")]
    GradingUnavailable(String),
}

impl PracticeError {
    /// Whether a later retry of the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PracticeError::GradingUnavailable(_) | PracticeError::Write { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PracticeError>;
