// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Score persistence.
//!
//! This module provides:
//! - The `ScoreStore` contract over two integer keys
//! - An in-memory store for tests and throwaway sessions
//! - A TOML file store that survives restarts
//! - The `remaining_songs` hand-off slot used to resume a game

pub mod handoff;

pub use handoff::Handoff;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QuizError, Result};

/// Key of the running score
pub const CURRENT_SCORE_KEY: &str = "current_score";
/// Key of the best score
pub const HIGH_SCORE_KEY: &str = "high_score";

/// Durable store for the current and best scores.
///
/// Missing values read as 0. Each write is atomic on its own key.
pub trait ScoreStore {
    /// Current game score
    fn current(&self) -> u32;

    /// Persist the current game score
    fn set_current(&mut self, score: u32) -> Result<()>;

    /// Best score across games
    fn best(&self) -> u32;

    /// Persist the best score
    fn set_best(&mut self, score: u32) -> Result<()>;
}

impl<T: ScoreStore + ?Sized> ScoreStore for &mut T {
    fn current(&self) -> u32 {
        (**self).current()
    }

    fn set_current(&mut self, score: u32) -> Result<()> {
        (**self).set_current(score)
    }

    fn best(&self) -> u32 {
        (**self).best()
    }

    fn set_best(&mut self, score: u32) -> Result<()> {
        (**self).set_best(score)
    }
}

/// Scores held in memory only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryScoreStore {
    current: u32,
    best: u32,
}

impl MemoryScoreStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with existing scores
    pub fn with_scores(current: u32, best: u32) -> Self {
        Self { current, best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn current(&self) -> u32 {
        self.current
    }

    fn set_current(&mut self, score: u32) -> Result<()> {
        self.current = score;
        Ok(())
    }

    fn best(&self) -> u32 {
        self.best
    }

    fn set_best(&mut self, score: u32) -> Result<()> {
        self.best = score;
        Ok(())
    }
}

/// On-disk score document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    current_score: u32,
    #[serde(default)]
    high_score: u32,
}

/// Scores stored in a TOML file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
    scores: ScoreFile,
}

impl FileScoreStore {
    /// Open a store, reading existing scores if the file exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let scores = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)
                .map_err(|e| QuizError::Store(format!("failed to parse {:?}: {}", path, e)))?
        } else {
            ScoreFile::default()
        };

        debug!(
            path = ?path,
            current = scores.current_score,
            best = scores.high_score,
            "opened score store"
        );
        Ok(Self { path, scores })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reset both scores to 0
    pub fn reset(&mut self) -> Result<()> {
        self.scores = ScoreFile::default();
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let contents = toml::to_string(&self.scores)
            .map_err(|e| QuizError::Store(format!("failed to serialize scores: {}", e)))?;
        write_replace(&self.path, &contents)
    }
}

impl ScoreStore for FileScoreStore {
    fn current(&self) -> u32 {
        self.scores.current_score
    }

    fn set_current(&mut self, score: u32) -> Result<()> {
        self.scores.current_score = score;
        self.flush()
    }

    fn best(&self) -> u32 {
        self.scores.high_score
    }

    fn set_best(&mut self, score: u32) -> Result<()> {
        self.scores.high_score = score;
        self.flush()
    }
}

/// Write through a sibling temp file so readers never see a torn file
pub(crate) fn write_replace(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.current(), 0);
        assert_eq!(store.best(), 0);

        store.set_current(3).unwrap();
        store.set_best(5).unwrap();
        assert_eq!(store, MemoryScoreStore::with_scores(3, 5));
    }

    #[test]
    fn test_file_store_defaults_to_zero() {
        let dir = tempdir().unwrap();
        let store = FileScoreStore::open(dir.path().join("scores.toml")).unwrap();
        assert_eq!(store.current(), 0);
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.toml");

        let mut store = FileScoreStore::open(&path).unwrap();
        store.set_current(4).unwrap();
        store.set_best(9).unwrap();
        drop(store);

        let store = FileScoreStore::open(&path).unwrap();
        assert_eq!(store.current(), 4);
        assert_eq!(store.best(), 9);

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(CURRENT_SCORE_KEY));
        assert!(contents.contains(HIGH_SCORE_KEY));
    }

    #[test]
    fn test_file_store_missing_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.toml");
        fs::write(&path, "high_score = 12\n").unwrap();

        let store = FileScoreStore::open(&path).unwrap();
        assert_eq!(store.current(), 0);
        assert_eq!(store.best(), 12);
    }

    #[test]
    fn test_file_store_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scores.toml");

        let mut store = FileScoreStore::open(&path).unwrap();
        store.set_best(7).unwrap();
        store.reset().unwrap();

        let store = FileScoreStore::open(&path).unwrap();
        assert_eq!(store.best(), 0);
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.toml");
        fs::write(&path, "current_score = \"many\"").unwrap();

        assert!(matches!(FileScoreStore::open(&path), Err(QuizError::Store(_))));
    }
}
