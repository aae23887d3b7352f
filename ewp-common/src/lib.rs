//! # EWP Common Library
//!
//! Shared code for the Elite Wedding Planner image tooling:
//! - Compression presets keyed by image role
//! - Configuration loading and images root resolution
//! - Image backend abstraction (decode, resize, WebP/AVIF encode)
//! - Byte-size formatting for batch reports
//! - The blur placeholder table format

pub mod blur_data;
pub mod config;
pub mod error;
pub mod human_bytes;
pub mod imaging;
pub mod logging;
pub mod presets;

pub use error::{Error, Result};
pub use imaging::{BackendError, Dimensions, ImageBackend, OutputFormat, RustBackend};
pub use presets::{CompressionPreset, PresetTable};
