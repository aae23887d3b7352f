//! ewp-vn - Venue image normalizer
//!
//! Converts `{images}/venues/{venue}/*-temp.jpg` into `{name}.webp`, removing
//! each temp file after its WebP is written. Missing venue directories and
//! per-file failures are logged; the exit status stays zero.

use anyhow::{Context, Result};
use clap::Parser;
use ewp_common::blur_data::write_blur_table;
use ewp_common::config::ImagesRootResolver;
use ewp_common::RustBackend;
use ewp_vn::{BlurGenerator, VenueNormalizer, VenueNormalizerConfig};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for ewp-vn
#[derive(Parser, Debug)]
#[command(name = "ewp-vn")]
#[command(about = "Convert venue *-temp.jpg uploads to WebP")]
#[command(version)]
struct Args {
    /// Root of the public images tree
    #[arg(short, long)]
    images_root: Option<PathBuf>,

    /// Venue directory to process (repeatable; replaces the default list)
    #[arg(long = "venue", value_name = "DIR")]
    venues: Vec<String>,

    /// Config file (defaults to ~/.config/ewp/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write a blur placeholder table for the venue WebPs to FILE
    #[arg(long, value_name = "FILE")]
    blur_data: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = ewp_common::logging::bootstrap(args.config.as_deref());

    info!(
        "Starting EWP Venue Normalizer (ewp-vn) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let images_root = ImagesRootResolver::new(&toml_config)
        .with_cli_arg(args.images_root.clone())
        .resolve();

    let venues = if args.venues.is_empty() {
        toml_config.venues.directories.clone().unwrap_or_default()
    } else {
        args.venues.clone()
    };
    let config = VenueNormalizerConfig::new(&images_root).with_venues(venues);
    info!("Venues root: {}", config.venues_root.display());
    info!("Venues: {}", config.venues.join(", "));

    let backend = RustBackend::new();
    let report = VenueNormalizer::new(&backend, &config).run();
    report.log_summary();

    let blur_path = args.blur_data.clone().or(toml_config.venues.blur_data.clone());
    if let Some(path) = blur_path {
        let blur = BlurGenerator::new(&backend, &config.venues_root).generate(&config.venues);
        write_blur_table(&blur.table, &path)
            .with_context(|| format!("writing blur data to {}", path.display()))?;
        info!("Blur data: {}", path.display());
    }

    Ok(())
}
