// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for the quiz.

use thiserror::Error;

use crate::catalog::SampleId;

/// Errors produced by the quiz core and its adapters
#[derive(Error, Debug)]
pub enum QuizError {
    /// Catalog lookup miss
    #[error("Sample not found: {0}")]
    SampleNotFound(SampleId),

    /// Too few samples left to ask a question
    #[error("Pool exhausted: {remaining} sample(s) remaining")]
    PoolExhausted { remaining: usize },

    /// Reported by the media collaborator
    #[error("Media failure: {0}")]
    Media(String),

    /// Pick rejected by the engine
    #[error("Invalid pick {index}: {reason}")]
    InvalidPick { index: usize, reason: String },

    /// Operation not valid in the current engine state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Score store read/write failure
    #[error("Score store error: {0}")]
    Store(String),

    /// Malformed catalog
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using QuizError
pub type Result<T> = std::result::Result<T, QuizError>;
