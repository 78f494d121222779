//! Random Forest Artifact
//!
//! Native evaluator for a fitted random forest exported in the flat-array
//! tree layout (`children_left` / `children_right` / `feature` /
//! `threshold` / per-node class counts). Inference walks each tree to a
//! leaf and averages the leaves' normalized class counts, which reproduces
//! the fitted model's probability output exactly. No randomness at
//! inference time: identical input always yields identical output.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::RecommendError;
use crate::features::N_FEATURES;
use crate::summary::argmax;

/// One fitted decision tree in flat-array layout.
///
/// Node `i` is a leaf when `children_left[i] < 0`. `value[i]` holds the
/// training-sample class counts that reached node `i`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    /// Walk from the root to a leaf and return its class-count row.
    fn leaf_counts(&self, scaled: &[f64; N_FEATURES]) -> Result<&[f64], RecommendError> {
        let mut node = 0usize;
        loop {
            if self.children_left[node] < 0 {
                return Ok(&self.value[node]);
            }

            let feature = self.feature[node] as usize;
            if feature >= N_FEATURES {
                return Err(RecommendError::DimensionMismatch {
                    artifact: "forest split feature",
                    expected: N_FEATURES,
                    found: feature + 1,
                });
            }

            node = if scaled[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Fitted multi-class random forest.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Load the forest from a JSON artifact and verify its structure.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read forest artifact: {:?}", path))?;

        let forest: RandomForest = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse forest JSON")?;

        forest.validate()?;
        debug!(
            trees = forest.trees.len(),
            classes = forest.n_classes,
            "loaded forest artifact"
        );

        Ok(forest)
    }

    /// Construct from in-memory trees (tests, alternative persistence).
    pub fn from_parts(
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    ) -> Result<Self> {
        let forest = Self {
            n_features,
            n_classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    /// Structural integrity checks, run once at load.
    ///
    /// A corrupted artifact aborts here rather than producing wrong
    /// predictions on every request.
    fn validate(&self) -> Result<()> {
        if self.n_features != N_FEATURES {
            return Err(RecommendError::DimensionMismatch {
                artifact: "forest",
                expected: N_FEATURES,
                found: self.n_features,
            }
            .into());
        }
        if self.n_classes == 0 {
            bail!("forest artifact declares zero classes");
        }
        if self.trees.is_empty() {
            bail!("forest artifact contains no trees");
        }

        for (t, tree) in self.trees.iter().enumerate() {
            let nodes = tree.children_left.len();
            if nodes == 0 {
                bail!("tree {} is empty", t);
            }
            if tree.children_right.len() != nodes
                || tree.feature.len() != nodes
                || tree.threshold.len() != nodes
                || tree.value.len() != nodes
            {
                bail!("tree {} has inconsistent node arrays", t);
            }

            for (i, row) in tree.value.iter().enumerate() {
                if row.len() != self.n_classes {
                    bail!(
                        "tree {} node {} has {} class counts, expected {}",
                        t,
                        i,
                        row.len(),
                        self.n_classes
                    );
                }
            }

            for i in 0..nodes {
                let left = tree.children_left[i];
                let right = tree.children_right[i];
                if (left < 0) != (right < 0) {
                    bail!("tree {} node {} has mismatched leaf markers", t, i);
                }
                if left >= 0 && (left as usize >= nodes || right as usize >= nodes) {
                    bail!("tree {} node {} child index out of range", t, i);
                }
            }
        }

        Ok(())
    }

    /// Number of output classes.
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Probability distribution over the K classes for one scaled vector.
    ///
    /// Mean over trees of the reached leaf's normalized class counts. No
    /// renormalization beyond what the leaves themselves carry.
    pub fn predict_proba(&self, scaled: &[f64; N_FEATURES]) -> Result<Vec<f64>, RecommendError> {
        if self.n_features != N_FEATURES {
            return Err(RecommendError::DimensionMismatch {
                artifact: "forest",
                expected: N_FEATURES,
                found: self.n_features,
            });
        }

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let counts = tree.leaf_counts(scaled)?;
            let total: f64 = counts.iter().sum();
            if total <= 0.0 {
                return Err(RecommendError::ModelIntegrity(
                    "tree leaf with no training samples".to_string(),
                ));
            }
            for (p, &count) in proba.iter_mut().zip(counts) {
                *p += count / total;
            }
        }

        let n_trees = self.trees.len() as f64;
        for p in proba.iter_mut() {
            *p /= n_trees;
        }
        Ok(proba)
    }

    /// Most probable class index; ties resolve to the lowest index.
    pub fn predict(&self, scaled: &[f64; N_FEATURES]) -> Result<usize, RecommendError> {
        let proba = self.predict_proba(scaled)?;
        Ok(argmax(&proba))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Depth-1 stump: split on `feature` at `threshold`, with the given
    /// leaf class counts.
    fn stump(feature: i64, threshold: f64, left: Vec<f64>, right: Vec<f64>) -> DecisionTree {
        let root: Vec<f64> = left.iter().zip(&right).map(|(a, b)| a + b).collect();
        DecisionTree {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![feature, -2, -2],
            threshold: vec![threshold, -2.0, -2.0],
            value: vec![root, left, right],
        }
    }

    #[test]
    fn test_single_stump_proba() {
        let forest = RandomForest::from_parts(
            7,
            2,
            vec![stump(0, 0.0, vec![3.0, 1.0], vec![0.0, 4.0])],
        )
        .unwrap();

        let proba = forest.predict_proba(&[-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_relative_eq!(proba[0], 0.75);
        assert_relative_eq!(proba[1], 0.25);

        let proba = forest.predict_proba(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_relative_eq!(proba[0], 0.0);
        assert_relative_eq!(proba[1], 1.0);
    }

    #[test]
    fn test_split_boundary_goes_left() {
        let forest = RandomForest::from_parts(
            7,
            2,
            vec![stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0])],
        )
        .unwrap();

        // value == threshold takes the left branch
        let class = forest.predict(&[0.0; 7]).unwrap();
        assert_eq!(class, 0);
    }

    #[test]
    fn test_averaging_across_trees() {
        let forest = RandomForest::from_parts(
            7,
            2,
            vec![
                stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0]),
                stump(1, 0.0, vec![1.0, 0.0], vec![1.0, 1.0]),
            ],
        )
        .unwrap();

        // First tree goes right (class 1), second goes right (50/50)
        let proba = forest
            .predict_proba(&[1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        assert_relative_eq!(proba[0], 0.25);
        assert_relative_eq!(proba[1], 0.75);

        let total: f64 = proba.iter().sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tied_leaf_predicts_lowest_index() {
        let forest = RandomForest::from_parts(
            7,
            2,
            vec![stump(0, 0.0, vec![1.0, 1.0], vec![1.0, 1.0])],
        )
        .unwrap();

        assert_eq!(forest.predict(&[0.0; 7]).unwrap(), 0);
    }

    #[test]
    fn test_wrong_feature_width_rejected() {
        let err = RandomForest::from_parts(
            6,
            2,
            vec![stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }

    #[test]
    fn test_inconsistent_class_counts_rejected() {
        let mut tree = stump(0, 0.0, vec![1.0, 0.0], vec![0.0, 1.0]);
        tree.value[1] = vec![1.0, 0.0, 0.0]; // 3 counts in a 2-class forest

        let err = RandomForest::from_parts(7, 2, vec![tree]).unwrap_err();
        assert!(err.to_string().contains("class counts"));
    }

    #[test]
    fn test_empty_forest_rejected() {
        let err = RandomForest::from_parts(7, 2, vec![]).unwrap_err();
        assert!(err.to_string().contains("no trees"));
    }

    #[test]
    fn test_empty_leaf_is_integrity_error() {
        let forest = RandomForest::from_parts(
            7,
            2,
            vec![stump(0, 0.0, vec![0.0, 0.0], vec![1.0, 0.0])],
        )
        .unwrap();

        let err = forest.predict_proba(&[-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, RecommendError::ModelIntegrity(_)));
    }
}
