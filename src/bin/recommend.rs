//! Interactive crop recommendation
//!
//! Runs the prediction pipeline once for a set of measurements and prints
//! the recommended crop, the confidence, and the full ranked probability
//! table.
//!
//! Usage:
//!   cargo run --bin recommend -- <artifact_dir> [N P K temperature humidity ph rainfall]
//!
//! Without measurement arguments the standard form defaults are used
//! (N=50, P=50, K=50, temperature=20, humidity=80, ph=7, rainfall=200).

use std::path::Path;

use anyhow::{bail, Context, Result};
use crop_recommender_rust::{CropRecommender, FeatureVector, RawMeasurements, FEATURE_NAMES};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_recommender_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn parse_value(name: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number for {}", value, name))
}

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 1 && args.len() != 8 {
        bail!("usage: recommend <artifact_dir> [N P K temperature humidity ph rainfall]");
    }

    let raw = if args.len() == 8 {
        RawMeasurements {
            nitrogen: parse_value("N", &args[1])?,
            phosphorus: parse_value("P", &args[2])?,
            potassium: parse_value("K", &args[3])?,
            temperature: parse_value("temperature", &args[4])?,
            humidity: parse_value("humidity", &args[5])?,
            ph: parse_value("ph", &args[6])?,
            rainfall: parse_value("rainfall", &args[7])?,
        }
    } else {
        RawMeasurements::default()
    };

    let recommender = CropRecommender::load(Path::new(&args[0]))?;
    let features = FeatureVector::build(&raw)?;

    let result = recommender.recommend(&features)?;

    println!("\n{}", "=".repeat(50));
    println!("Recommended crop: {}", result.predicted_label.to_uppercase());
    println!("Confidence: {:.2}%", result.confidence_percent);
    println!("{}", "=".repeat(50));

    println!("\n{:<16} {:>10}", "Crop", "Percentage");
    for entry in &result.ranked_probabilities {
        println!("{:<16} {:>9.2}%", entry.crop, entry.percentage);
    }

    println!("\nInput summary:");
    for (name, value) in FEATURE_NAMES.iter().zip(result.input_snapshot.as_array()) {
        println!("  {:<12} {}", name, value);
    }
    println!();

    Ok(())
}
