//! Backend trait and the value types flowing through it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Delivery formats produced by the batch tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    WebP,
    Avif,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
            OutputFormat::Avif => "avif",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::WebP => "image/webp",
            OutputFormat::Avif => "image/avif",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Cropping policy when placing the source into the target box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Fill the box exactly, cropping overflow
    Cover,
    /// Fit entirely inside the box, preserving all content
    Contain,
}

/// One output to produce from a decoded source
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeJob {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub quality: u8,
    pub target: Dimensions,
    pub fit: Fit,
    /// Encoder effort (WebP method 0..=6); encoder default when `None`
    pub effort: Option<u8>,
}

/// A variant written to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedVariant {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub dimensions: Dimensions,
    pub quality: u8,
    pub bytes: u64,
}

/// Low-resolution preview used for blur placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// Encoded WebP bytes
    pub bytes: Vec<u8>,
    /// Dimensions of the full source image
    pub source: Dimensions,
    /// Dimensions of the preview itself
    pub preview: Dimensions,
}

/// Image backend errors
#[derive(Debug, Error)]
pub enum BackendError {
    /// Source could not be opened or read
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source is corrupt or in an unsupported format
    #[error("cannot decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Encoder rejected the frame
    #[error("{format} encode failed: {message}")]
    Encode { format: OutputFormat, message: String },

    /// Encoded output could not be written
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackendError {
    pub fn decode(path: &Path, message: impl Into<String>) -> Self {
        BackendError::Decode {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// Pixel pipeline used by the batch tools
///
/// Implementations must write every job's output before returning `Ok`; a job
/// list is all-or-nothing from the caller's point of view.
pub trait ImageBackend: Send + Sync {
    /// Read dimensions without decoding the full frame
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `source` once and produce every job's output
    fn render(&self, source: &Path, jobs: &[EncodeJob]) -> Result<Vec<EncodedVariant>, BackendError>;

    /// Encode a `width`-pixel-wide WebP preview of `source`
    fn preview(&self, source: &Path, width: u32, quality: u8) -> Result<Preview, BackendError>;
}
