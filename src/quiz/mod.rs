// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Quiz core.
//!
//! This module provides:
//! - Question generation from the remaining pool
//! - The quiz engine state machine
//! - Presenter and media player contracts
//! - The one-shot advance timer used by presenters

pub mod engine;
pub mod generator;
pub mod presenter;
pub mod timer;

pub use engine::{
    EndReason, EngineState, QuizEngine, Reveal, StartMode, Transition,
    CORRECT_ANSWER_DELAY_MILLIS,
};
pub use generator::{Question, QuestionGenerator, MIN_POOL_SIZE, OPTION_SLOTS};
pub use presenter::{MediaPlayer, PlaybackState, Presenter};
pub use timer::AdvanceTimer;

use rand::Rng;

use crate::catalog::SampleId;
use crate::error::Result;

/// Current and best score as seen by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub current: u32,
    pub best: u32,
}

impl Scores {
    /// Create a score pair
    pub fn new(current: u32, best: u32) -> Self {
        Self { current, best }
    }
}

/// Source of questions for the engine
pub trait QuestionSource {
    /// Draw a question from `pool`
    fn next_question(&mut self, pool: &[SampleId]) -> Result<Question>;
}

impl<T: QuestionSource + ?Sized> QuestionSource for &mut T {
    fn next_question(&mut self, pool: &[SampleId]) -> Result<Question> {
        (**self).next_question(pool)
    }
}

impl<R: Rng> QuestionSource for QuestionGenerator<R> {
    fn next_question(&mut self, pool: &[SampleId]) -> Result<Question> {
        self.generate(pool)
    }
}
