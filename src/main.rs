use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use gaql_catalog::{Pipeline, Settings, SourceMode};
use tracing::info;

#[derive(Parser)]
#[command(name = "gaql_catalog", about = "Build or load the Google Ads query resource catalog")]
struct Cli {
    /// Override the configured source (CATALOG_USE_LOCAL_DATA_SOURCE)
    #[arg(short, long, value_enum)]
    mode: Option<SourceMode>,
    /// Snapshot file to write (live) or read (cached)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(path) = cli.snapshot {
        settings.snapshot_path = path;
    }
    let mode = cli.mode.unwrap_or_else(|| settings.source_mode());
    info!(settings = ?settings, mode = ?mode, "Starting catalog load");

    let pipeline = Pipeline::from_settings(&settings, mode)?;
    let resources = pipeline.load().await.context("Catalog load failed")?;

    let with_details = resources.iter().filter(|r| r.details.is_some()).count();
    let fields: usize = resources.iter().map(|r| r.field_count()).sum();
    println!(
        "Loaded {} resources ({} with details, {} fields) from {:?} source in {:.1}s",
        resources.len(),
        with_details,
        fields,
        mode,
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}
