// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Session hand-off slot.
//!
//! Carries the remaining pool from one session to the next. A present slot
//! means the next start resumes; an absent slot means a new game.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::write_replace;
use crate::catalog::SampleId;
use crate::error::{QuizError, Result};
use crate::quiz::StartMode;

/// Name of the hand-off key
pub const REMAINING_SONGS_KEY: &str = "remaining_songs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HandoffFile {
    remaining_songs: Vec<SampleId>,
}

/// File-backed hand-off slot
#[derive(Debug, Clone)]
pub struct Handoff {
    path: PathBuf,
}

impl Handoff {
    /// Create a slot backed by `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the carried pool, `None` when the slot is empty
    pub fn load(&self) -> Result<Option<Vec<SampleId>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let file: HandoffFile = toml::from_str(&contents).map_err(|e| {
            QuizError::Store(format!("failed to parse {:?}: {}", self.path, e))
        })?;
        Ok(Some(file.remaining_songs))
    }

    /// Store the pool for the next session
    pub fn save(&self, pool: &[SampleId]) -> Result<()> {
        let file = HandoffFile {
            remaining_songs: pool.to_vec(),
        };
        let contents = toml::to_string(&file)
            .map_err(|e| QuizError::Store(format!("failed to serialize hand-off: {}", e)))?;
        write_replace(&self.path, &contents)?;
        debug!(path = ?self.path, remaining = pool.len(), "saved hand-off");
        Ok(())
    }

    /// Empty the slot
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Take the carried pool and empty the slot
    pub fn take(&self) -> Result<Option<Vec<SampleId>>> {
        let pool = self.load()?;
        self.clear()?;
        Ok(pool)
    }

    /// How the next session starts, consuming the slot.
    ///
    /// A present slot resumes unless `force_new` is set, in which case the
    /// slot is discarded.
    pub fn start_mode(&self, force_new: bool) -> Result<StartMode> {
        if force_new {
            self.clear()?;
            return Ok(StartMode::NewGame);
        }
        Ok(StartMode::from_handoff(self.take()?))
    }
}
