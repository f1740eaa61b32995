// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Composer quiz: hear a clip, name the composer.

pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod quiz;
pub mod score;
pub mod ui;

pub use catalog::{Artwork, Catalog, Sample, SampleCatalog, SampleId};
pub use error::{QuizError, Result};
pub use quiz::{
    EndReason, EngineState, Question, QuestionGenerator, QuestionSource, QuizEngine, Scores,
    StartMode, Transition,
};
pub use score::{FileScoreStore, MemoryScoreStore, ScoreStore};
