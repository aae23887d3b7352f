//! ewp-ui - Responsive image preview server
//!
//! Serves the images tree under `/images` and renders the image component
//! and gallery fragments against it, using the blur placeholder table that
//! `ewp-vn --blur-data` generates.

use anyhow::{Context, Result};
use clap::Parser;
use ewp_common::config::ImagesRootResolver;
use ewp_ui::{build_router, AppState, BlurPlaceholders};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 5790;

/// Command-line arguments for ewp-ui
#[derive(Parser, Debug)]
#[command(name = "ewp-ui")]
#[command(about = "Preview server for responsive image rendering")]
#[command(version)]
struct Args {
    /// Root of the public images tree
    #[arg(short, long)]
    images_root: Option<PathBuf>,

    /// Port to listen on (127.0.0.1 only)
    #[arg(short, long)]
    port: Option<u16>,

    /// Blur placeholder table (JSON)
    #[arg(long, value_name = "FILE")]
    blur_data: Option<PathBuf>,

    /// Config file (defaults to ~/.config/ewp/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = ewp_common::logging::bootstrap(args.config.as_deref());

    info!(
        "Starting EWP Image Preview (ewp-ui) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let images_root = ImagesRootResolver::new(&toml_config)
        .with_cli_arg(args.images_root.clone())
        .resolve();
    if !images_root.is_dir() {
        warn!("Images root not found: {} (/images will 404)", images_root.display());
    }
    info!("Images root: {}", images_root.display());

    let blur_path = args.blur_data.clone().or(toml_config.preview.blur_data.clone());
    let placeholders = match blur_path {
        Some(path) => match BlurPlaceholders::load(&path) {
            Ok(placeholders) => {
                info!("✓ Loaded {} blur placeholders from {}", placeholders.len(), path.display());
                placeholders
            }
            Err(e) => {
                warn!("Cannot load blur data {}: {} (using defaults)", path.display(), e);
                BlurPlaceholders::empty()
            }
        },
        None => {
            info!("No blur data configured; every image uses the default placeholder");
            BlurPlaceholders::empty()
        }
    };

    let state = AppState::new(placeholders, images_root).context("compiling templates")?;
    let app = build_router(state);

    let port = args.port.or(toml_config.preview.port).unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("ewp-ui listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
