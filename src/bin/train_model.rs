//! Batch entry point: fit and evaluate the efficiency classifier

use anyhow::Result;
use clap::Parser;
use ml_efficiency::TrainEvalPipeline;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "train-model")]
#[command(about = "Fit the efficiency classifier on persisted artifacts and report metrics")]
struct Args {
    /// Directory holding the split partitions from process-data
    #[arg(long, default_value = "artifacts/processed")]
    processed: PathBuf,

    /// Directory for the fitted model
    #[arg(long, default_value = "artifacts/models")]
    models: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();
    let pipeline = TrainEvalPipeline::new(&args.processed, &args.models);
    let report = pipeline.run()?;

    println!("\nModel Performance");
    println!("=================");
    println!("{report}");

    Ok(())
}
