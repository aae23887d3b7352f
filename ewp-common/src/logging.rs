//! Tracing setup shared by the EWP binaries

use crate::config::{load_toml_config, TomlConfig};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Load the config file, then install the global subscriber at its log level
///
/// Config loading runs under a temporary stderr subscriber so warnings about a
/// broken config file are not lost before the real subscriber exists.
/// `RUST_LOG`, when set, overrides the configured level.
pub fn bootstrap(explicit_config: Option<&Path>) -> TomlConfig {
    let startup = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    let config = tracing::subscriber::with_default(startup, || load_toml_config(explicit_config));

    init_tracing(&config.logging.level);
    config
}

/// Install the global fmt subscriber; a second call is a no-op
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
