mod sink;
mod source;
mod transformations;
mod types;

use std::env;
use std::path::Path;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use sink::CsvSink;
use transformations::{build_registry, TransformEngine};
use types::config::EtlConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let mut config = EtlConfig::load(Path::new("config/config.json"))?;

    // Env var overrides take precedence over the config file.
    if let Ok(input_path) = env::var("ETL_INPUT_PATH") {
        config.input_path = input_path;
    }
    if let Ok(output_dir) = env::var("ETL_OUTPUT_DIR") {
        config.output_dir = output_dir;
    }

    tracing::info!(
        "Processing {} into {}",
        config.input_path,
        config.output_dir
    );

    let envelopes = source::load_envelopes(Path::new(&config.input_path))?;

    let engine = TransformEngine::new(build_registry());
    let report = engine
        .run(&envelopes)
        .context("envelope transformation failed")?;

    if report.skipped_envelopes > 0 {
        tracing::warn!(
            "Skipped {} envelope(s) with undecodable payloads",
            report.skipped_envelopes
        );
    }

    let sink = CsvSink::new(&config.output_dir);
    let written = sink
        .write_batch(&report.batch)
        .context("failed to write datasets")?;

    tracing::info!(
        curated_offer_options = report.batch.curated_offer_options.len(),
        dynamic_price_option = report.batch.dynamic_price_option.len(),
        dynamic_price_range = report.batch.dynamic_price_range.len(),
        files_written = written.len(),
        "Batch complete"
    );

    Ok(())
}
