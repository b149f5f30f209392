//! Persistence of the single [`UserProgress`] blob.
//!
//! Loading never fails: a missing or unreadable blob yields default progress,
//! fields absent from an older blob take their defaults, and hearts above
//! `maxHearts` are clamped. Saving failures
//! are logged and dropped so a broken disk never interrupts a lesson. The
//! `try_*` methods on [`JsonFileStore`] expose the underlying errors.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::practice_engine::{
    error::{PracticeError, Result},
    models::UserProgress,
};

pub trait ProgressStore {
    /// Stored progress, or defaults when there is none or it cannot be read.
    fn load(&self) -> UserProgress;

    /// Best-effort write.
    fn save(&self, progress: &UserProgress);
}

/// Pretty-printed JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist yet. A loaded blob is
    /// [normalized](UserProgress::normalized).
    pub fn try_load(&self) -> Result<Option<UserProgress>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| PracticeError::Read {
            path: self.path.clone(),
            source,
        })?;
        let progress: UserProgress = serde_json::from_str(&contents)?;
        Ok(Some(progress.normalized()))
    }

    pub fn try_save(&self, progress: &UserProgress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| PracticeError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, contents).map_err(|source| PracticeError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> UserProgress {
        match self.try_load() {
            Ok(progress) => progress.unwrap_or_default(),
            Err(err) => {
                warn!(path = ?self.path, error = %err, "could not load progress, starting fresh");
                UserProgress::default()
            }
        }
    }

    fn save(&self, progress: &UserProgress) {
        if let Err(err) = self.try_save(progress) {
            warn!(path = ?self.path, error = %err, "could not save progress");
        }
    }
}

/// In-memory JSON blob, for tests and embedding. Not thread-safe.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw JSON blob, as an older client may have written it.
    pub fn with_blob(json: impl Into<String>) -> Self {
        Self { blob: RefCell::new(Some(json.into())) }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> UserProgress {
        let blob = self.blob.borrow();
        let Some(json) = blob.as_deref() else {
            return UserProgress::default();
        };
        match serde_json::from_str::<UserProgress>(json) {
            Ok(progress) => progress.normalized(),
            Err(err) => {
                warn!(error = %err, "stored progress is corrupt, starting fresh");
                UserProgress::default()
            }
        }
    }

    fn save(&self, progress: &UserProgress) {
        match serde_json::to_string(progress) {
            Ok(json) => *self.blob.borrow_mut() = Some(json),
            Err(err) => warn!(error = %err, "could not serialize progress"),
        }
    }
}
