// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Question generation.
//!
//! Draws up to four distinct options from the remaining pool and marks one
//! of them as the answer. All randomness comes from the injected RNG, so a
//! seeded generator replays the same questions.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::SampleId;
use crate::error::{QuizError, Result};

/// Number of answer slots on screen
pub const OPTION_SLOTS: usize = 4;

/// Smallest pool that still makes a question
pub const MIN_POOL_SIZE: usize = 2;

/// A drawn question: distinct options with one correct answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    options: Vec<SampleId>,
    correct_index: usize,
}

impl Question {
    /// Build a question from explicit options.
    ///
    /// Returns `None` unless there are 2 to 4 distinct options and
    /// `correct_index` points at one of them.
    pub fn new(options: Vec<SampleId>, correct_index: usize) -> Option<Self> {
        let distinct: HashSet<_> = options.iter().collect();
        let valid = (MIN_POOL_SIZE..=OPTION_SLOTS).contains(&options.len())
            && distinct.len() == options.len()
            && correct_index < options.len();
        valid.then_some(Self { options, correct_index })
    }

    /// Options in display order
    pub fn options(&self) -> &[SampleId] {
        &self.options
    }

    /// Option at a display slot
    pub fn option(&self, index: usize) -> Option<SampleId> {
        self.options.get(index).copied()
    }

    /// Slot holding the correct answer
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Id of the correct answer
    pub fn correct_id(&self) -> SampleId {
        self.options[self.correct_index]
    }

    /// Number of options in use
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Questions always have at least two options
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Which of the on-screen slots hold an option
    pub fn enabled_mask(&self) -> [bool; OPTION_SLOTS] {
        let mut mask = [false; OPTION_SLOTS];
        for slot in mask.iter_mut().take(self.options.len()) {
            *slot = true;
        }
        mask
    }
}

/// Random question generator
#[derive(Debug, Clone)]
pub struct QuestionGenerator<R: Rng = StdRng> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuestionGenerator<R> {
    /// Create a generator around an RNG
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw a question from `pool`.
    ///
    /// Repeated ids in the pool count once. Fails with `PoolExhausted` when
    /// fewer than two distinct ids remain.
    pub fn generate(&mut self, pool: &[SampleId]) -> Result<Question> {
        let mut seen = HashSet::with_capacity(pool.len());
        let mut candidates: Vec<SampleId> =
            pool.iter().copied().filter(|id| seen.insert(*id)).collect();

        if candidates.len() < MIN_POOL_SIZE {
            return Err(QuizError::PoolExhausted {
                remaining: candidates.len(),
            });
        }

        let count = candidates.len().min(OPTION_SLOTS);
        let (chosen, _) = candidates.partial_shuffle(&mut self.rng, count);
        let options = chosen.to_vec();
        let correct_index = self.rng.gen_range(0..count);

        Ok(Question {
            options,
            correct_index,
        })
    }
}
