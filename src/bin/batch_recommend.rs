//! Batch crop recommendation
//!
//! Loads a CSV of measurement rows and scores every row in parallel
//! against the same artifact handles, printing one recommendation per row.
//!
//! Usage:
//!   cargo run --bin batch_recommend -- <artifact_dir> <measurements_csv>

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Result};
use crop_recommender_rust::{data, CropRecommender};
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

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        bail!("usage: batch_recommend <artifact_dir> <measurements_csv>");
    }

    let recommender = CropRecommender::load(Path::new(&args[0]))?;
    let inputs = data::load_measurements(Path::new(&args[1]))?;

    let start = Instant::now();
    let results = recommender.recommend_batch(&inputs)?;
    let elapsed = start.elapsed();

    println!("\n{:>5}  {:<16} {:>10}", "Row", "Crop", "Confidence");
    for (i, result) in results.iter().enumerate() {
        println!(
            "{:>5}  {:<16} {:>9.2}%",
            i + 1,
            result.predicted_label,
            result.confidence_percent
        );
    }
    println!(
        "\nScored {} rows in {:.1} ms",
        results.len(),
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(())
}
