use std::fs;
use std::io;
use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "neon-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Persistence collaborator for the single high-score scalar.
///
/// Implementations absorb their own failures: the session keeps a purely
/// in-memory high score when storage misbehaves, and play is unaffected.
pub trait HighScoreStore {
    /// Returns the persisted high score, or 0 when nothing usable exists.
    fn load(&self) -> u32;

    /// Persists a new high score, fire and forget.
    fn save(&self, score: u32);
}

/// Failure modes of the JSON score file.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("score file format: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// JSON-file-backed store under the platform data directory.
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    /// Creates a store at the platform-correct default location.
    #[must_use]
    pub fn at_default_path() -> Self {
        let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.push(APP_DIR_NAME);
        base.push(SCORE_FILE_NAME);
        Self { path: base }
    }

    /// Creates a store reading and writing `path`.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the score file; a missing file is a fresh install, not a fault.
    fn read(&self) -> Result<u32, ScoreStoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(error) => return Err(error.into()),
        };

        let file: ScoreFile = serde_json::from_str(&raw)?;
        Ok(file.high_score)
    }

    fn write(&self, score: u32) -> Result<(), ScoreStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&ScoreFile { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        match self.read() {
            Ok(score) => score,
            Err(error) => {
                warn!("could not read {}: {error}", self.path.display());
                0
            }
        }
    }

    fn save(&self, score: u32) {
        if let Err(error) = self.write(score) {
            warn!(
                "could not save high score to {}: {error}",
                self.path.display()
            );
        }
    }
}
