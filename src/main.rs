use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use sfx_trim::args::Args;
use sfx_trim::pipeline::{RunOptions, run_batch};
use sfx_trim::project::{JsonBatchWriter, ManifestProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if !args.manifest.exists() {
        error!("Manifest not found: {}", args.manifest.display());
        std::process::exit(1);
    }
    info!("Trimming sources listed in {}", args.manifest.display());

    let mut options = RunOptions {
        dry_run: args.dry_run,
        ..RunOptions::default()
    };
    if let Some(jobs) = args.jobs {
        options.jobs = jobs;
    }

    let provider = Arc::new(ManifestProvider::new(&args.manifest));
    let mut writer = JsonBatchWriter::new(&args.out);
    let report = run_batch(provider, &mut writer, args.trim_config(), &options).await?;

    for skipped in &report.skipped {
        warn!("Skipped {}: {}", skipped.source_id, skipped.reason);
    }
    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&report.batch)?);
    }
    info!(
        "Process complete: {} processed, {} skipped",
        report.processed,
        report.skipped.len()
    );

    if !report.skipped.is_empty() {
        std::process::exit(2);
    }
    Ok(())
}
