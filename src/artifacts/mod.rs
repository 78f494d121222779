//! Fitted model artifacts
//!
//! Three independently loadable JSON artifacts exported from the trained
//! model: a standard scaler, a random forest, and the label vocabulary.
//! Each is loaded once at startup and shared read-only thereafter; no
//! reload or hot-swap facility exists.

pub mod forest;
pub mod labels;
pub mod scaler;

// Re-export the artifact types
pub use forest::{DecisionTree, RandomForest};
pub use labels::CropLabels;
pub use scaler::StandardScaler;
