//! Crop Recommendation Pipeline
//!
//! Recommends a crop to plant from seven soil/weather measurements using a
//! pre-trained classifier: validated fixed-order feature vector → scaled
//! vector → random-forest class probabilities → ranked, percentage-annotated
//! recommendation with a confidence score.
//!
//! Module layout:
//! - `features`: input validation and the canonical feature order
//! - `artifacts/`: the three fitted artifact adapters (scaler, forest, labels)
//! - `summary`: ranking, percentages, confidence
//! - `recommender`: the one-way pipeline coordinator
//! - `data`: batch measurement loading with Polars
//! - `session`: the single-slot last-result holder

pub mod artifacts;
pub mod data;
pub mod error;
pub mod features;
pub mod recommender;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use artifacts::{CropLabels, DecisionTree, RandomForest, StandardScaler};
pub use error::RecommendError;
pub use features::{FeatureVector, RawMeasurements, FEATURE_NAMES, N_FEATURES};
pub use recommender::{CropRecommender, Decode, PredictProba, Scale, PROBABILITY_TOLERANCE};
pub use session::SessionSlot;
pub use summary::{PredictionResult, RankedCrop};
