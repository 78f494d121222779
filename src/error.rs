//! Pipeline error taxonomy
//!
//! Separates recoverable input mistakes from fatal artifact corruption.
//! No variant is ever swallowed or replaced by a default prediction; a
//! failure in any stage aborts the whole pipeline run.

use thiserror::Error;

/// Errors surfaced by the prediction pipeline.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// A user-supplied measurement is missing, non-numeric, or outside its
    /// declared bounds. Recoverable: the caller corrects the value and
    /// re-invokes the whole pipeline.
    #[error("invalid value for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// A fitted artifact disagrees with the pipeline's fixed dimensionality.
    /// Fatal: retrying with the same artifacts yields the same failure.
    #[error("{artifact} dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },

    /// The classifier's output is not a probability distribution. Never
    /// corrected silently; renormalizing would mask a corrupted artifact.
    #[error("model integrity violation: {0}")]
    ModelIntegrity(String),

    /// A class index fell outside the codec's vocabulary. Indicates an
    /// internal defect, never clamped.
    #[error("class index {index} outside known range 0..{known}")]
    UnknownClassIndex {
        index: usize,
        known: usize,
    },
}
