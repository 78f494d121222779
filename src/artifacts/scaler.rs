//! Standard Scaler Artifact
//!
//! Per-feature affine transform `(x - mean) / scale` with parameters fixed
//! at fit time. The artifact is a JSON file holding the fitted `mean` and
//! `scale` arrays, both of width 7.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::RecommendError;
use crate::features::{FeatureVector, N_FEATURES};

/// Fitted standardization parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Load scaler parameters from a JSON artifact.
    ///
    /// A width other than 7 means the artifact was fitted for a different
    /// feature set and is rejected immediately.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler artifact: {:?}", path))?;

        let scaler: StandardScaler = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse scaler JSON")?;

        scaler.check_width()?;
        debug!(width = scaler.mean.len(), "loaded scaler artifact");

        Ok(scaler)
    }

    /// Construct from in-memory parameters (tests, alternative persistence).
    pub fn from_params(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    fn check_width(&self) -> Result<(), RecommendError> {
        if self.mean.len() != N_FEATURES {
            return Err(RecommendError::DimensionMismatch {
                artifact: "scaler mean",
                expected: N_FEATURES,
                found: self.mean.len(),
            });
        }
        if self.scale.len() != N_FEATURES {
            return Err(RecommendError::DimensionMismatch {
                artifact: "scaler scale",
                expected: N_FEATURES,
                found: self.scale.len(),
            });
        }
        Ok(())
    }

    /// Apply the fitted standardization to one feature vector.
    ///
    /// Pure function of the vector and the fitted parameters; the scaled
    /// vector is ephemeral and never stored.
    pub fn transform(&self, features: &FeatureVector) -> Result<[f64; N_FEATURES], RecommendError> {
        self.check_width()?;

        let mut scaled = [0.0; N_FEATURES];
        for (i, &value) in features.as_array().iter().enumerate() {
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }
        Ok(scaled)
    }
}
