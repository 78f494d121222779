//! Feature Vector Builder
//!
//! Validates and assembles the seven named soil/weather measurements into
//! the fixed-order vector the scaler and classifier were fitted on. This is
//! the only place domain bounds are enforced; downstream stages assume a
//! well-formed vector.

use serde::Serialize;

use crate::error::RecommendError;

/// Number of input features.
pub const N_FEATURES: usize = 7;

/// Canonical feature order the artifacts were fitted on.
pub const FEATURE_NAMES: [&str; N_FEATURES] =
    ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

/// Inclusive domain bounds per feature, indexed like `FEATURE_NAMES`.
const BOUNDS: [(f64, f64); N_FEATURES] = [
    (0.0, 150.0), // N (ppm)
    (0.0, 150.0), // P (ppm)
    (0.0, 150.0), // K (ppm)
    (0.0, 50.0),  // temperature (°C)
    (0.0, 100.0), // humidity (%)
    (0.0, 14.0),  // ph
    (0.0, 500.0), // rainfall (mm)
];

/// Raw named measurements as the form or CLI supplies them.
///
/// `Default` holds the interactive form's starting values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurements {
    /// Nitrogen content in soil (ppm)
    pub nitrogen: f64,
    /// Phosphorus content in soil (ppm)
    pub phosphorus: f64,
    /// Potassium content in soil (ppm)
    pub potassium: f64,
    /// Average temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Soil pH
    pub ph: f64,
    /// Annual rainfall (mm)
    pub rainfall: f64,
}

impl Default for RawMeasurements {
    fn default() -> Self {
        Self {
            nitrogen: 50.0,
            phosphorus: 50.0,
            potassium: 50.0,
            temperature: 20.0,
            humidity: 80.0,
            ph: 7.0,
            rainfall: 200.0,
        }
    }
}

/// Validated feature vector in canonical order.
///
/// Immutable once built; created fresh per prediction request and owned by
/// that invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    values: [f64; N_FEATURES],
}

impl FeatureVector {
    /// Validate the named measurements and assemble the canonical-order
    /// vector `[N, P, K, temperature, humidity, ph, rainfall]`.
    ///
    /// Bounds are inclusive. N, P, and K are whole-number nutrient readings
    /// in the training data, so fractional values are rejected.
    pub fn build(raw: &RawMeasurements) -> Result<Self, RecommendError> {
        let values = [
            raw.nitrogen,
            raw.phosphorus,
            raw.potassium,
            raw.temperature,
            raw.humidity,
            raw.ph,
            raw.rainfall,
        ];

        for (i, &value) in values.iter().enumerate() {
            let field = FEATURE_NAMES[i];

            if !value.is_finite() {
                return Err(RecommendError::InvalidInput {
                    field,
                    reason: format!("{} is not a finite number", value),
                });
            }

            let (low, high) = BOUNDS[i];
            if value < low || value > high {
                return Err(RecommendError::InvalidInput {
                    field,
                    reason: format!("{} is outside [{}, {}]", value, low, high),
                });
            }
        }

        // N, P, K are integer-valued
        for i in 0..3 {
            if values[i].fract() != 0.0 {
                return Err(RecommendError::InvalidInput {
                    field: FEATURE_NAMES[i],
                    reason: format!("{} is not a whole number", values[i]),
                });
            }
        }

        Ok(Self { values })
    }

    /// The canonical-order values.
    pub fn as_array(&self) -> &[f64; N_FEATURES] {
        &self.values
    }
}
