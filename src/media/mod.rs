// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Media players.
//!
//! The quiz never decodes audio itself. Clips are handed to an external
//! program, or only logged when no program is configured.

pub mod command;

pub use command::CommandPlayer;

use tracing::info;

use crate::error::Result;
use crate::quiz::{MediaPlayer, PlaybackState};

/// Player that only logs what it would play
#[derive(Debug, Default)]
pub struct NullPlayer {
    now_playing: Option<String>,
    released: bool,
}

impl NullPlayer {
    /// Create a new null player
    pub fn new() -> Self {
        Self::default()
    }

    /// URI of the clip "playing", if any
    pub fn now_playing(&self) -> Option<&str> {
        self.now_playing.as_deref()
    }

    /// Check if the player was released
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl MediaPlayer for NullPlayer {
    fn play(&mut self, uri: &str) -> Result<()> {
        info!(uri, "play (no player configured)");
        self.now_playing = Some(uri.to_string());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.now_playing = None;
        Ok(())
    }

    fn release(&mut self) {
        self.now_playing = None;
        self.released = true;
    }
}

/// Either player, chosen from configuration at startup
#[derive(Debug)]
pub enum AnyPlayer {
    Null(NullPlayer),
    Command(CommandPlayer),
}

impl AnyPlayer {
    /// Next state change to report, if any
    pub fn poll_state(&mut self) -> Option<(bool, PlaybackState)> {
        match self {
            AnyPlayer::Null(_) => None,
            AnyPlayer::Command(player) => player.poll_state(),
        }
    }
}

impl MediaPlayer for AnyPlayer {
    fn play(&mut self, uri: &str) -> Result<()> {
        match self {
            AnyPlayer::Null(player) => player.play(uri),
            AnyPlayer::Command(player) => player.play(uri),
        }
    }

    fn stop(&mut self) -> Result<()> {
        match self {
            AnyPlayer::Null(player) => player.stop(),
            AnyPlayer::Command(player) => player.stop(),
        }
    }

    fn release(&mut self) {
        match self {
            AnyPlayer::Null(player) => player.release(),
            AnyPlayer::Command(player) => player.release(),
        }
    }
}
