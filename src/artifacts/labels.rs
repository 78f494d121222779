//! Crop Label Codec
//!
//! Bidirectional mapping between the classifier's internal class indices
//! and human-readable crop names. The vocabulary is the fitted label
//! encoder's class list, fixed post-load; no insertion or removal exists.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::RecommendError;

#[derive(Debug, Deserialize)]
struct LabelsArtifact {
    classes: Vec<String>,
}

/// Fixed crop-name vocabulary of cardinality K.
#[derive(Debug, Clone)]
pub struct CropLabels {
    classes: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl CropLabels {
    /// Load the vocabulary from a JSON artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read labels artifact: {:?}", path))?;

        let artifact: LabelsArtifact = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse labels JSON")?;

        let labels = Self::new(artifact.classes)?;
        debug!(classes = labels.len(), "loaded labels artifact");
        Ok(labels)
    }

    /// Build the codec from an ordered class list, rejecting duplicates.
    pub fn new(classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            bail!("labels artifact contains no classes");
        }

        let mut index = FxHashMap::default();
        for (i, name) in classes.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                bail!("duplicate crop name in labels artifact: {}", name);
            }
        }

        Ok(Self { classes, index })
    }

    /// Crop name for an internal class index.
    pub fn decode(&self, index: usize) -> Result<&str, RecommendError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(RecommendError::UnknownClassIndex {
                index,
                known: self.classes.len(),
            })
    }

    /// Internal class index for a crop name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Vocabulary cardinality K.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Crop names in internal index order.
    pub fn names(&self) -> &[String] {
        &self.classes
    }
}
