// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sample catalog.
//!
//! Read-only registry of quiz items, loaded once at startup from a YAML
//! file or from the catalog compiled into the binary.

pub mod sample;

pub use sample::{Artwork, Sample, SampleId};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Catalog compiled into the binary
const BUILTIN_CATALOG: &str = include_str!("../../assets/samples.yaml");

/// Lookup surface the quiz engine needs from a catalog
pub trait SampleCatalog {
    /// All sample ids, in a deterministic order
    fn all_ids(&self) -> Vec<SampleId>;

    /// Look up a sample by id
    fn get(&self, id: SampleId) -> Option<&Sample>;
}

impl<T: SampleCatalog + ?Sized> SampleCatalog for &T {
    fn all_ids(&self) -> Vec<SampleId> {
        (**self).all_ids()
    }

    fn get(&self, id: SampleId) -> Option<&Sample> {
        (**self).get(id)
    }
}

/// On-disk catalog layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogFile {
    #[serde(default)]
    pub samples: Vec<Sample>,
}

/// In-memory catalog, ordered as loaded
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    samples: Vec<Sample>,
    index: HashMap<SampleId, usize>,
}

impl Catalog {
    /// Build a catalog from samples, rejecting invalid entries
    pub fn new(samples: Vec<Sample>) -> Result<Self, QuizError> {
        let mut seen = HashSet::with_capacity(samples.len());
        for sample in &samples {
            if sample.id == 0 {
                return Err(QuizError::Catalog(format!(
                    "sample ids must be positive (composer {:?})",
                    sample.composer
                )));
            }
            if sample.composer.trim().is_empty() {
                return Err(QuizError::Catalog(format!(
                    "sample {} has an empty composer",
                    sample.id
                )));
            }
            if !seen.insert(sample.id) {
                return Err(QuizError::Catalog(format!("duplicate sample id {}", sample.id)));
            }
        }

        let index = samples
            .iter()
            .enumerate()
            .map(|(i, sample)| (sample.id, i))
            .collect();

        Ok(Self { samples, index })
    }

    /// Load a catalog from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read catalog file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a catalog from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).context("Failed to parse catalog YAML")?;
        Ok(Self::new(file.samples)?)
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG).context("Built-in catalog is invalid")
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate samples in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl SampleCatalog for Catalog {
    fn all_ids(&self) -> Vec<SampleId> {
        self.samples.iter().map(|s| s.id).collect()
    }

    fn get(&self, id: SampleId) -> Option<&Sample> {
        self.index.get(&id).map(|&i| &self.samples[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let yaml = r#"
samples:
  - id: 2
    composer: "Beethoven"
    uri: "clips/b.ogg"
    artwork: "beethoven"
  - id: 1
    composer: "Bach"
    title: "Cello Suite"
    uri: "clips/a.ogg"
    artwork: "bach"
"#;

        let catalog = Catalog::from_yaml(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.all_ids(), vec![2, 1]);
        assert_eq!(catalog.get(1).unwrap().composer, "Bach");
        assert_eq!(catalog.get(2).unwrap().uri, "clips/b.ogg");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn test_reject_duplicate_ids() {
        let samples = vec![
            Sample::new(1, "Bach", "a.ogg", "bach"),
            Sample::new(1, "Handel", "b.ogg", "handel"),
        ];
        assert!(matches!(Catalog::new(samples), Err(QuizError::Catalog(_))));
    }

    #[test]
    fn test_reject_zero_id_and_empty_composer() {
        assert!(Catalog::new(vec![Sample::new(0, "Bach", "a.ogg", "bach")]).is_err());
        assert!(Catalog::new(vec![Sample::new(4, "  ", "a.ogg", "none")]).is_err());
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() >= 4);
        for id in catalog.all_ids() {
            let sample = catalog.get(id).unwrap();
            assert!(!sample.composer.is_empty());
            assert!(!sample.uri.is_empty());
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.yaml");
        fs::write(
            &path,
            "samples:\n  - id: 9\n    composer: Grieg\n    uri: g.ogg\n    artwork: grieg\n",
        )
        .unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.all_ids(), vec![9]);

        assert!(Catalog::load(dir.path().join("missing.yaml")).is_err());
    }
}
