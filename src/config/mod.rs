// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the quiz application.
//!
//! Settings are read from an optional YAML file. Every field has a default,
//! so an empty file (or no file) gives a playable setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::quiz::CORRECT_ANSWER_DELAY_MILLIS;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizConfig {
    /// Catalog YAML file (built-in catalog if absent)
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Score file
    #[serde(default = "default_score_file")]
    pub score_file: PathBuf,
    /// Hand-off file carrying the remaining pool between runs
    #[serde(default = "default_handoff_file")]
    pub handoff_file: PathBuf,
    /// Pause after an answer, in milliseconds
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// Fixed RNG seed for reproducible games
    #[serde(default)]
    pub seed: Option<u64>,
    /// External clip player
    #[serde(default)]
    pub player: Option<PlayerConfig>,
    /// UI refresh rate
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Log output file
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_score_file() -> PathBuf {
    PathBuf::from("composer-quiz-scores.toml")
}
fn default_handoff_file() -> PathBuf {
    PathBuf::from("composer-quiz-session.toml")
}
fn default_reveal_delay_ms() -> u64 {
    CORRECT_ANSWER_DELAY_MILLIS
}
fn default_frame_rate() -> u32 {
    30
}
fn default_log_file() -> PathBuf {
    PathBuf::from("composer-quiz.log")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            score_file: default_score_file(),
            handoff_file: default_handoff_file(),
            reveal_delay_ms: default_reveal_delay_ms(),
            seed: None,
            player: None,
            frame_rate: default_frame_rate(),
            log_file: default_log_file(),
        }
    }
}

impl QuizConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Reveal delay as a duration
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Frame rate clamped to a usable range
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate.clamp(1, 120)
    }
}

/// External player program
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Program to run, e.g. "mpv"
    pub command: String,
    /// Arguments placed before the clip URI
    #[serde(default)]
    pub args: Vec<String>,
}
