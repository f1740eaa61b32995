// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One-shot advance timer.
//!
//! Holds at most one pending deadline. The owning event loop polls it and
//! forwards a fired timer to `QuizEngine::advance`.

use std::time::{Duration, Instant};

/// Single pending deadline
#[derive(Debug, Clone, Default)]
pub struct AdvanceTimer {
    deadline: Option<Instant>,
}

impl AdvanceTimer {
    /// Create a disarmed timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer `delay` from now, replacing any pending deadline
    pub fn schedule(&mut self, delay: Duration) {
        self.schedule_from(Instant::now(), delay);
    }

    /// Arm the timer `delay` after `now`
    pub fn schedule_from(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the timer
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check if a deadline is pending
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, `None` when disarmed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Returns true exactly once when the deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
