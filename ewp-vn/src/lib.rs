//! ewp-vn library - Venue image normalizer
//!
//! One-shot migration of per-venue `*-temp.jpg` uploads into WebP, deleting
//! each temp file only once its replacement is on disk. Optionally builds the
//! blur placeholder table for the converted venue images.

pub mod blur;
pub mod normalizer;

pub use blur::{BlurGenerator, BlurReport};
pub use normalizer::{
    NormalizeReport, TempFileOutcome, VenueNormalizer, VenueNormalizerConfig, DEFAULT_VENUES,
};
