//! Configuration loading and images root resolution
//!
//! Images root priority order:
//! 1. Command-line argument (highest priority)
//! 2. `EWP_IMAGES_ROOT` environment variable
//! 3. `images_root` in the TOML config file
//! 4. Compiled default (`public/images` under the working directory)
//!
//! A missing or unreadable config file never stops a tool: it logs a warning
//! and falls back to defaults.

use crate::presets::CompressionPreset;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the images root
pub const IMAGES_ROOT_ENV: &str = "EWP_IMAGES_ROOT";

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "EWP_CONFIG";

/// Built-in fallbacks used when nothing else is configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDefaults {
    pub images_root: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            images_root: PathBuf::from("public").join("images"),
            log_level: default_log_level(),
        }
    }
}

/// Bootstrap configuration loaded from TOML
///
/// Every section is optional; an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root of the public images tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_root: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub optimizer: OptimizerSection,

    #[serde(default)]
    pub venues: VenuesSection,

    #[serde(default)]
    pub preview: PreviewSection,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// `[optimizer]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerSection {
    /// Output directory, relative to the images root unless absolute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Role for categories with no matching preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_role: Option<String>,

    /// Per-role overrides merged over the built-in table
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub presets: BTreeMap<String, CompressionPreset>,
}

/// `[venues]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenuesSection {
    /// Venue directory names to normalize, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directories: Option<Vec<String>>,

    /// Where to write the generated blur table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_data: Option<PathBuf>,
}

/// `[preview]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Blur table consulted by the preview server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_data: Option<PathBuf>,
}

/// Read and parse a config file, failing on any error
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Load configuration, degrading to defaults instead of failing
///
/// `explicit` (from `--config`) is tried first, then `EWP_CONFIG`, then the
/// platform config locations.
pub fn load_toml_config(explicit: Option<&Path>) -> TomlConfig {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(default_config_path),
    };

    let Some(path) = path else {
        debug!("No config file found, using defaults");
        return TomlConfig::default();
    };

    match read_toml_config(&path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Ignoring config {}: {} (using defaults)", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// First existing platform config file, if any
///
/// Linux: `~/.config/ewp/config.toml`, then `/etc/ewp/config.toml`.
/// Elsewhere: `<platform config dir>/ewp/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("ewp").join("config.toml"));

    let mut candidates: Vec<PathBuf> = user_config.into_iter().collect();
    if cfg!(target_os = "linux") {
        candidates.push(PathBuf::from("/etc/ewp/config.toml"));
    }

    candidates.into_iter().find(|p| p.is_file())
}

/// Resolves the images root using the documented priority order
#[derive(Debug, Clone)]
pub struct ImagesRootResolver {
    cli_arg: Option<PathBuf>,
    config_value: Option<PathBuf>,
}

impl ImagesRootResolver {
    pub fn new(config: &TomlConfig) -> Self {
        Self {
            cli_arg: None,
            config_value: config.images_root.clone(),
        }
    }

    pub fn with_cli_arg(mut self, cli_arg: Option<PathBuf>) -> Self {
        self.cli_arg = cli_arg;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Some(path) = std::env::var_os(IMAGES_ROOT_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(path);
        }

        if let Some(path) = &self.config_value {
            return path.clone();
        }

        CompiledDefaults::for_current_platform().images_root
    }
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Serialize `value` as pretty JSON and move it into place atomically
///
/// Writes `<path>.tmp` first, then renames over `path`, so readers never see a
/// half-written file.
pub fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&tmp_path, json)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}
