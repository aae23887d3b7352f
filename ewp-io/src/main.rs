//! ewp-io - Offline image optimizer
//!
//! Reads `{images}/{category}/*.{jpg,jpeg,png,gif,webp}` and writes
//! `{images}/optimized/{basename}.{webp,avif}` using the category's role preset.
//! Per-file failures are reported but never change the exit status.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use ewp_common::config::{resolve_relative, ImagesRootResolver};
use ewp_common::{PresetTable, RustBackend};
use ewp_io::{Manifest, Optimizer, OptimizerConfig};
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments for ewp-io
#[derive(Parser, Debug)]
#[command(name = "ewp-io")]
#[command(about = "Optimize site images into WebP + AVIF by role preset")]
#[command(version)]
struct Args {
    /// Root of the public images tree
    #[arg(short, long)]
    images_root: Option<PathBuf>,

    /// Output directory (relative to the images root unless absolute)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Role preset for categories without their own preset
    #[arg(long)]
    default_role: Option<String>,

    /// Config file (defaults to ~/.config/ewp/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// List planned conversions without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Do not write manifest.json
    #[arg(long)]
    no_manifest: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = ewp_common::logging::bootstrap(args.config.as_deref());

    info!(
        "Starting EWP Image Optimizer (ewp-io) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let images_root = ImagesRootResolver::new(&toml_config)
        .with_cli_arg(args.images_root.clone())
        .resolve();
    if !images_root.is_dir() {
        error!("Images root not found: {}", images_root.display());
        bail!("images root not found: {}", images_root.display());
    }

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| toml_config.optimizer.output_dir.clone())
        .map(|dir| resolve_relative(&images_root, &dir))
        .unwrap_or_else(|| images_root.join("optimized"));

    let presets = PresetTable::standard()
        .merged(&toml_config.optimizer.presets)
        .context("invalid [optimizer.presets]")?;

    let default_role = args
        .default_role
        .clone()
        .or_else(|| toml_config.optimizer.default_role.clone())
        .unwrap_or_else(|| ewp_common::presets::DEFAULT_ROLE.to_string());
    if !presets.contains(&default_role) {
        bail!("default role '{}' has no preset", default_role);
    }

    let config = OptimizerConfig {
        images_root,
        output_dir,
        presets,
        default_role,
    };
    info!("Images root: {}", config.images_root.display());
    info!("Output: {}", config.output_dir.display());
    for role in config.presets.roles() {
        if let Some(preset) = config.presets.get(role) {
            info!("  {}: quality {}, width {}", role, preset.quality, preset.width);
        }
    }

    let backend = RustBackend::new();
    let optimizer = Optimizer::new(&backend, &config);

    let plan = optimizer.plan().context("scanning images root")?;
    info!("Found {} images", plan.len());
    if plan.is_empty() {
        info!("No images found.");
        return Ok(());
    }

    if args.dry_run {
        optimizer.dry_run(&plan);
        return Ok(());
    }

    let report = optimizer
        .run(&plan)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    report.log_summary();

    if !args.no_manifest {
        let manifest = Manifest::from_report(&report, Utc::now());
        match manifest.write(&config.output_dir) {
            Ok(()) => info!("Manifest: {}", config.output_dir.join("manifest.json").display()),
            Err(e) => error!("Failed to write manifest: {}", e),
        }
    }

    Ok(())
}
