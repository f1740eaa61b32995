// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Collaborator contracts the engine drives.
//!
//! A `Presenter` is whatever surface shows the question; a `MediaPlayer`
//! plays the clip. Both are called from the engine on the presenter's own
//! event loop, never from another thread.

use std::fmt;
use std::time::Duration;

use crate::catalog::Artwork;
use crate::error::Result;

use super::generator::OPTION_SLOTS;
use super::Scores;

/// Surface that displays the quiz
pub trait Presenter {
    /// Display composer names. Slots with `enabled[i] == false` are unused
    /// and must be shown disabled.
    fn show_question(&mut self, labels: &[String; OPTION_SLOTS], enabled: [bool; OPTION_SLOTS]);

    /// Show the placeholder artwork used before the answer is known
    fn set_neutral_artwork(&mut self);

    /// Show the artwork of the correct answer
    fn set_artwork(&mut self, artwork: &Artwork);

    /// Highlight the correct option as positive, all others as negative,
    /// and disable every option
    fn reveal(&mut self, correct_index: usize, picked_index: usize);

    /// Arm the single pending advance timer, replacing any earlier one.
    /// When it fires the presenter calls `QuizEngine::advance`.
    fn schedule_advance(&mut self, delay: Duration);

    /// Disarm the pending advance timer, if any
    fn cancel_scheduled(&mut self);

    /// Hand off to the end-of-game screen
    fn end_game(&mut self, scores: Scores);

    /// Show a short user-visible error
    fn show_error(&mut self, message: &str);

    /// Scores changed
    fn update_scores(&mut self, _scores: Scores) {}
}

/// Media collaborator. Calls are fire-and-forget: the engine logs failures
/// and carries on.
pub trait MediaPlayer {
    /// Start playing `uri` progressively
    fn play(&mut self, uri: &str) -> Result<()>;

    /// Stop the current clip
    fn stop(&mut self) -> Result<()>;

    /// Free the player. No further calls follow.
    fn release(&mut self);
}

/// Player state reported by the media collaborator, used for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Buffering,
    Ready,
    Ended,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "IDLE",
            PlaybackState::Buffering => "BUFFERING",
            PlaybackState::Ready => "READY",
            PlaybackState::Ended => "ENDED",
        };
        f.write_str(name)
    }
}
