//! Crop Recommender - Main coordinator for the prediction pipeline
//!
//! Wires the three fitted artifact handles into the one-way pipeline:
//! validated features → scaled vector → class probabilities → ranked
//! summary. No branching, no retry, no partial results: a failure in any
//! stage aborts the whole invocation.
//!
//! The artifacts sit behind three narrow traits so the concrete model
//! format is swappable without touching pipeline logic.

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::artifacts::{CropLabels, RandomForest, StandardScaler};
use crate::error::RecommendError;
use crate::features::{FeatureVector, N_FEATURES};
use crate::summary::{build_result, PredictionResult};

/// Tolerance for the probability-mass integrity check.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Fitted affine feature transform.
pub trait Scale {
    fn scale(&self, features: &FeatureVector) -> Result<[f64; N_FEATURES], RecommendError>;
}

/// Fitted probabilistic multi-class model.
pub trait PredictProba {
    fn n_classes(&self) -> usize;
    fn predict_proba(&self, scaled: &[f64; N_FEATURES]) -> Result<Vec<f64>, RecommendError>;
}

/// Fixed class-index to crop-name vocabulary.
pub trait Decode {
    fn n_classes(&self) -> usize;
    fn decode(&self, index: usize) -> Result<&str, RecommendError>;
}

impl Scale for StandardScaler {
    fn scale(&self, features: &FeatureVector) -> Result<[f64; N_FEATURES], RecommendError> {
        self.transform(features)
    }
}

impl PredictProba for RandomForest {
    fn n_classes(&self) -> usize {
        RandomForest::n_classes(self)
    }

    fn predict_proba(&self, scaled: &[f64; N_FEATURES]) -> Result<Vec<f64>, RecommendError> {
        RandomForest::predict_proba(self, scaled)
    }
}

impl Decode for CropLabels {
    fn n_classes(&self) -> usize {
        self.len()
    }

    fn decode(&self, index: usize) -> Result<&str, RecommendError> {
        CropLabels::decode(self, index)
    }
}

/// The prediction pipeline with its three read-only artifact handles.
///
/// Constructed once at startup; every prediction shares the handles
/// without locking since no writer exists post-load.
#[derive(Debug)]
pub struct CropRecommender<S = StandardScaler, C = RandomForest, L = CropLabels> {
    scaler: S,
    classifier: C,
    labels: L,
}

impl CropRecommender {
    /// Load all three artifacts from a directory and wire the pipeline.
    ///
    /// Expects `scaler.json`, `forest.json`, and `labels.json`. Loading
    /// happens exactly once; there is no reload facility.
    pub fn load(artifact_dir: &Path) -> Result<Self> {
        info!(dir = %artifact_dir.display(), "loading model artifacts");

        let scaler = StandardScaler::load(&artifact_dir.join("scaler.json"))?;
        let classifier = RandomForest::load(&artifact_dir.join("forest.json"))?;
        let labels = CropLabels::load(&artifact_dir.join("labels.json"))?;

        info!(crops = labels.len(), "artifacts loaded");
        Ok(Self::new(scaler, classifier, labels)?)
    }
}

impl<S: Scale, C: PredictProba, L: Decode> CropRecommender<S, C, L> {
    /// Wire pre-loaded artifacts, checking that the classifier's class
    /// count matches the label vocabulary's cardinality.
    pub fn new(scaler: S, classifier: C, labels: L) -> Result<Self, RecommendError> {
        if classifier.n_classes() != labels.n_classes() {
            return Err(RecommendError::DimensionMismatch {
                artifact: "label vocabulary",
                expected: classifier.n_classes(),
                found: labels.n_classes(),
            });
        }

        Ok(Self {
            scaler,
            classifier,
            labels,
        })
    }

    /// Run the full pipeline for one set of validated measurements.
    ///
    /// Deterministic: identical input against the same artifacts yields a
    /// bit-identical result.
    pub fn recommend(&self, features: &FeatureVector) -> Result<PredictionResult, RecommendError> {
        let scaled = self.scaler.scale(features)?;
        let proba = self.classifier.predict_proba(&scaled)?;
        check_distribution(&proba)?;

        let result = build_result(&proba, &self.labels, *features)?;
        debug!(
            crop = %result.predicted_label,
            confidence = result.confidence_percent,
            "prediction complete"
        );
        Ok(result)
    }

    /// Score many independent measurement sets in parallel.
    ///
    /// Requests share only the read-only artifact handles; the first
    /// failure fails the whole batch.
    pub fn recommend_batch(
        &self,
        inputs: &[FeatureVector],
    ) -> Result<Vec<PredictionResult>, RecommendError>
    where
        S: Sync,
        C: Sync,
        L: Sync,
    {
        inputs
            .par_iter()
            .map(|features| self.recommend(features))
            .collect()
    }
}

/// Verify the classifier's output is a probability distribution.
///
/// Out-of-tolerance mass is surfaced, never renormalized.
fn check_distribution(proba: &[f64]) -> Result<(), RecommendError> {
    if proba.is_empty() {
        return Err(RecommendError::ModelIntegrity(
            "empty probability vector".to_string(),
        ));
    }

    for (index, &p) in proba.iter().enumerate() {
        if !p.is_finite() || p < 0.0 {
            return Err(RecommendError::ModelIntegrity(format!(
                "class {} has invalid probability {}",
                index, p
            )));
        }
    }

    let total: f64 = proba.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(RecommendError::ModelIntegrity(format!(
            "probabilities sum to {} (expected 1.0 within {})",
            total, PROBABILITY_TOLERANCE
        )));
    }

    Ok(())
}
