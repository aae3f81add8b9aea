//! Batch entry point: prepare the raw telemetry log for training

use anyhow::Result;
use clap::Parser;
use ml_efficiency::FeaturePipeline;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "process-data")]
#[command(about = "Transform the raw machine telemetry log into model-ready artifacts")]
struct Args {
    /// Raw telemetry CSV
    #[arg(long, default_value = "artifacts/raw/data.csv")]
    input: PathBuf,

    /// Directory for the split partitions and the fitted scaler
    #[arg(long, default_value = "artifacts/processed")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();
    let pipeline = FeaturePipeline::new(&args.input, &args.output);
    let summary = pipeline.run()?;

    println!("\nFeature Preparation");
    println!("===================");
    println!("Features:   {}", summary.n_features);
    println!("Train rows: {}", summary.train_rows);
    println!("Test rows:  {}", summary.test_rows);
    println!("Artifacts:  {:?}", args.output);

    Ok(())
}
