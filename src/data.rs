//! Batch input loading
//!
//! Reads measurement rows from CSV with Polars for the batch
//! recommendation path. Every row goes through the same builder as
//! interactive input, so domain bounds are enforced exactly once, in one
//! place.

use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use tracing::debug;

use crate::features::{FeatureVector, RawMeasurements, FEATURE_NAMES, N_FEATURES};

/// Load and validate measurement rows from a CSV file.
///
/// Expected columns: `N`, `P`, `K`, `temperature`, `humidity`, `ph`,
/// `rainfall` (the crop dataset layout). Integer columns are cast to
/// float before validation.
pub fn load_measurements(path: &Path) -> Result<Vec<FeatureVector>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load measurements CSV: {:?}", path))?;

    let mut columns = Vec::with_capacity(N_FEATURES);
    for name in FEATURE_NAMES {
        let column = df
            .column(name)
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        columns.push(column);
    }

    let mut vectors = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut values = [0.0; N_FEATURES];
        for (i, column) in columns.iter().enumerate() {
            values[i] = column
                .f64()?
                .get(row)
                .with_context(|| {
                    format!("Row {} has a missing value in '{}'", row, FEATURE_NAMES[i])
                })?;
        }

        let raw = RawMeasurements {
            nitrogen: values[0],
            phosphorus: values[1],
            potassium: values[2],
            temperature: values[3],
            humidity: values[4],
            ph: values[5],
            rainfall: values[6],
        };
        let features = FeatureVector::build(&raw)
            .with_context(|| format!("Row {} failed validation", row))?;
        vectors.push(features);
    }

    debug!(rows = vectors.len(), "loaded measurement rows");
    Ok(vectors)
}
