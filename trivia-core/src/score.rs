//! Durable best-streak storage.
//!
//! The best streak is the only value the engine persists across
//! sessions. Storage is injected behind a small trait so game logic
//! stays decoupled from the mechanism.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from score store operations.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Score record version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Durable storage for the best streak.
pub trait ScoreStore: Send {
    /// Best streak recorded so far (0 when none).
    fn best_streak(&self) -> u32;

    /// Record a new best streak.
    fn record_best(&mut self, streak: u32) -> Result<(), ScoreStoreError>;
}

/// In-memory store; state lasts for the process lifetime only.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing best streak.
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn best_streak(&self) -> u32 {
        self.best
    }

    fn record_best(&mut self, streak: u32) -> Result<(), ScoreStoreError> {
        self.best = streak;
        Ok(())
    }
}

/// Current score record version.
const RECORD_VERSION: u32 = 1;

/// On-disk shape of the score record.
#[derive(Debug, Serialize, Deserialize)]
struct ScoreRecord {
    version: u32,
    best_streak: u32,
}

/// File-backed store holding a small versioned JSON record.
///
/// Reads happen once at open; writes happen inside the synchronous
/// answer path, so this store uses blocking IO. The record is tiny.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    best: u32,
}

impl FileScoreStore {
    /// Open a store, reading any existing record.
    ///
    /// A missing file means no best streak has been recorded yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ScoreStoreError> {
        let path = path.into();
        let best = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let record: ScoreRecord = serde_json::from_str(&content)?;
                if record.version != RECORD_VERSION {
                    return Err(ScoreStoreError::VersionMismatch {
                        expected: RECORD_VERSION,
                        found: record.version,
                    });
                }
                record.best_streak
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, best })
    }
}

impl ScoreStore for FileScoreStore {
    fn best_streak(&self) -> u32 {
        self.best
    }

    fn record_best(&mut self, streak: u32) -> Result<(), ScoreStoreError> {
        self.best = streak;
        let record = ScoreRecord {
            version: RECORD_VERSION,
            best_streak: streak,
        };
        let content = serde_json::to_string_pretty(&record)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trivia-core-score-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.best_streak(), 0);

        store.record_best(5).unwrap();
        assert_eq!(store.best_streak(), 5);
    }

    #[test]
    fn test_file_store_missing_file_defaults_to_zero() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);

        let store = FileScoreStore::open(&path).unwrap();
        assert_eq!(store.best_streak(), 0);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let mut store = FileScoreStore::open(&path).unwrap();
        store.record_best(7).unwrap();
        drop(store);

        let reopened = FileScoreStore::open(&path).unwrap();
        assert_eq!(reopened.best_streak(), 7);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_version_mismatch() {
        let path = temp_path("version");
        std::fs::write(&path, r#"{"version": 99, "best_streak": 3}"#).unwrap();

        let result = FileScoreStore::open(&path);
        assert!(matches!(
            result,
            Err(ScoreStoreError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));

        let _ = std::fs::remove_file(&path);
    }
}
