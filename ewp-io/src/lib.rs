//! ewp-io library - Offline image optimizer
//!
//! Converts every raster image under the images root into a WebP and an AVIF
//! variant sized by the preset of its role (hero, gallery, thumbnail, icon).

pub mod manifest;
pub mod optimizer;
pub mod report;
pub mod scanner;

pub use manifest::Manifest;
pub use optimizer::{Optimizer, OptimizerConfig, PlannedConversion};
pub use report::{BatchReport, ConvertedImage, FileOutcome};
pub use scanner::{ImageScanner, ScanError, SourceImage};
