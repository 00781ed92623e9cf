//! Trace Metrics - Main Entry Point

mod render;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use feature_engine::FeatureConfig;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Batch statistical and peak feature extraction for CSV signal traces
#[derive(Debug, Parser)]
#[command(name = "trace-metrics", version)]
struct Args {
    /// Directory containing the CSV trace files
    dir: PathBuf,

    /// Anomaly band half-width, in standard deviations
    #[arg(long, default_value_t = 2.0)]
    sigma_multiplier: f64,

    /// How many of the widest peaks are averaged into Max Peak Width
    #[arg(long, default_value_t = 1)]
    top_k: usize,

    /// Absolute prominence threshold for the Peak Prominence Count, in
    /// input data units (assumes a known data scale)
    #[arg(long, default_value_t = 40.0)]
    prominence_threshold: f64,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Csv,
    Json,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cfg = FeatureConfig {
        sigma_multiplier: args.sigma_multiplier,
        top_k: args.top_k,
        prominence_threshold: args.prominence_threshold,
    };

    let files = trace_ingest::load_batch(&args.dir)
        .with_context(|| format!("loading traces from {}", args.dir.display()))?;
    info!("analyzing {} trace files", files.len());

    let records = batch_analyzer::analyze(&files, &cfg).context("analyzing trace batch")?;

    let output = match args.format {
        Format::Text => render::text(&records),
        Format::Csv => render::csv(&records),
        Format::Json => render::json(&records).context("encoding records as JSON")?,
    };
    print!("{output}");

    Ok(())
}
