// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Quiz items: a clip, its composer and the composer's artwork.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a sample
pub type SampleId = u32;

/// Opaque artwork handle, resolved by the presenter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artwork(String);

impl Artwork {
    /// Create an artwork handle
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Handle as stored in the catalog
    pub fn handle(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One piece of music in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unique positive id
    pub id: SampleId,
    /// Composer name shown on the answer buttons
    pub composer: String,
    /// Title of the piece
    #[serde(default)]
    pub title: Option<String>,
    /// Media URI, passed to the player verbatim
    pub uri: String,
    /// Composer artwork shown on reveal
    pub artwork: Artwork,
}

impl Sample {
    /// Create a new sample
    pub fn new(
        id: SampleId,
        composer: impl Into<String>,
        uri: impl Into<String>,
        artwork: impl Into<String>,
    ) -> Self {
        Self {
            id,
            composer: composer.into(),
            title: None,
            uri: uri.into(),
            artwork: Artwork::new(artwork),
        }
    }

    /// Set the title of the piece
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
