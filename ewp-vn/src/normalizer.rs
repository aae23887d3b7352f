//! Venue image normalizer
//!
//! Walks an explicit list of venue directories under `{images}/venues`. Each
//! `{name}-temp.jpg` becomes `{name}.webp` next to it: width capped by the
//! hero/other preset (never upscaled), contained within bounds, WebP effort 6.
//!
//! The temp file is deleted only after its WebP has been written. A failed
//! conversion leaves it in place, so a re-run picks it up again.

use ewp_common::human_bytes::{format_bytes, format_savings, savings_percent};
use ewp_common::imaging::{fit_to_width, EncodeJob, Fit, ImageBackend, OutputFormat};
use ewp_common::presets::VenuePresets;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Venue directories converted when none are configured
pub const DEFAULT_VENUES: [&str; 8] = [
    "oberoi-udaivilas",
    "taj-lake-palace",
    "leela-palace-udaipur",
    "taj-exotica-goa",
    "umaid-bhawan",
    "rambagh-palace",
    "w-goa",
    "park-hyatt-goa",
];

/// File name suffix marking an unconverted upload
pub const TEMP_SUFFIX: &str = "-temp.jpg";

/// libwebp method used for venue images (slowest, smallest)
pub const WEBP_EFFORT: u8 = 6;

/// `heroimage-temp.jpg` → `heroimage.webp`
pub fn output_name(temp_file_name: &str) -> Option<String> {
    temp_file_name
        .strip_suffix(TEMP_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .map(|stem| format!("{}.{}", stem, OutputFormat::WebP.extension()))
}

#[derive(Debug, Clone)]
pub struct VenueNormalizerConfig {
    /// Directory holding one subdirectory per venue
    pub venues_root: PathBuf,
    /// Venue directory names, processed in this order
    pub venues: Vec<String>,
    pub presets: VenuePresets,
}

impl VenueNormalizerConfig {
    /// Default venue list under `{images_root}/venues`
    pub fn new(images_root: &Path) -> Self {
        Self {
            venues_root: images_root.join("venues"),
            venues: DEFAULT_VENUES.iter().map(|v| v.to_string()).collect(),
            presets: VenuePresets::standard(),
        }
    }

    pub fn with_venues(mut self, venues: Vec<String>) -> Self {
        if !venues.is_empty() {
            self.venues = venues;
        }
        self
    }

    pub fn venue_dir(&self, venue: &str) -> PathBuf {
        self.venues_root.join(venue)
    }
}

/// Result of converting one temp file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempFileOutcome {
    Converted {
        venue: String,
        output: PathBuf,
        input_bytes: u64,
        output_bytes: u64,
        /// False when the WebP was written but the temp file could not be removed
        source_removed: bool,
    },
    Failed {
        file: String,
        message: String,
    },
}

/// Totals for one normalizer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub converted: usize,
    pub failed: usize,
    /// Venue directories that were missing or unreadable
    pub skipped_dirs: Vec<String>,
    /// Temp files left behind after a successful conversion
    pub sources_kept: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub failures: Vec<(String, String)>,
}

impl NormalizeReport {
    /// Fold step: account for one file
    pub fn record(mut self, outcome: &TempFileOutcome) -> Self {
        match outcome {
            TempFileOutcome::Converted {
                input_bytes,
                output_bytes,
                source_removed,
                ..
            } => {
                self.converted += 1;
                self.bytes_before += input_bytes;
                self.bytes_after += output_bytes;
                if !source_removed {
                    self.sources_kept += 1;
                }
            }
            TempFileOutcome::Failed { file, message } => {
                self.failed += 1;
                self.failures.push((file.clone(), message.clone()));
            }
        }
        self
    }

    pub fn skip_dir(mut self, venue: &str) -> Self {
        self.skipped_dirs.push(venue.to_string());
        self
    }

    pub fn log_summary(&self) {
        info!("Venue image optimization complete");
        info!("  Converted: {}", self.converted);
        info!("  Failed:    {}", self.failed);
        if !self.skipped_dirs.is_empty() {
            info!("  Skipped directories: {}", self.skipped_dirs.join(", "));
        }
        if self.converted > 0 {
            info!(
                "  {} -> {} ({} smaller)",
                format_bytes(self.bytes_before),
                format_bytes(self.bytes_after),
                format_savings(self.bytes_before, self.bytes_after)
            );
        }
        if self.sources_kept > 0 {
            warn!("  {} temp files could not be removed", self.sources_kept);
        }
    }
}

/// Normalizer over an injected backend
pub struct VenueNormalizer<'a, B: ImageBackend> {
    backend: &'a B,
    config: &'a VenueNormalizerConfig,
}

impl<'a, B: ImageBackend> VenueNormalizer<'a, B> {
    pub fn new(backend: &'a B, config: &'a VenueNormalizerConfig) -> Self {
        Self { backend, config }
    }

    /// `*-temp.jpg` files directly inside `dir`, sorted by name
    pub fn temp_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let is_temp = name.to_str().map_or(false, |n| output_name(n).is_some());
            if is_temp && entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Convert one temp file, then remove it if the WebP was written
    pub fn normalize_file(&self, venue: &str, source: &Path) -> TempFileOutcome {
        let file = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| source.display().to_string());
        let failed = |message: String| {
            error!("✗ Error processing {}: {}", file, message);
            TempFileOutcome::Failed {
                file: file.clone(),
                message,
            }
        };

        let Some(output_file) = output_name(&file) else {
            return failed(format!("not a {} file", TEMP_SUFFIX));
        };
        let input_bytes = match fs::metadata(source) {
            Ok(meta) => meta.len(),
            Err(e) => return failed(e.to_string()),
        };
        let dimensions = match self.backend.identify(source) {
            Ok(dimensions) if dimensions.is_empty() => {
                return failed("image has zero dimensions".to_string())
            }
            Ok(dimensions) => dimensions,
            Err(e) => return failed(e.to_string()),
        };

        let preset = self.config.presets.for_file_name(&file);
        let output = source.with_file_name(&output_file);
        let job = EncodeJob {
            output: output.clone(),
            format: OutputFormat::WebP,
            quality: preset.quality,
            target: fit_to_width(dimensions, preset.width),
            fit: Fit::Contain,
            effort: Some(WEBP_EFFORT),
        };

        match self.backend.render(source, std::slice::from_ref(&job)) {
            Ok(variants) => {
                let output_bytes: u64 = variants.iter().map(|v| v.bytes).sum();
                info!(
                    "✓ {}/{} - {:.0}KB ({:.1}% smaller)",
                    venue,
                    output_file,
                    output_bytes as f64 / 1024.0,
                    savings_percent(input_bytes, output_bytes)
                );

                let source_removed = match fs::remove_file(source) {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Converted but could not remove {}: {}", source.display(), e);
                        false
                    }
                };
                TempFileOutcome::Converted {
                    venue: venue.to_string(),
                    output,
                    input_bytes,
                    output_bytes,
                    source_removed,
                }
            }
            Err(e) => failed(e.to_string()),
        }
    }

    /// Convert every temp file of one venue; `None` when the directory is unusable
    pub fn normalize_venue(&self, venue: &str) -> Option<Vec<TempFileOutcome>> {
        let dir = self.config.venue_dir(venue);
        if !dir.is_dir() {
            info!("Skipping {} - directory not found", venue);
            return None;
        }

        let files = match Self::temp_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Skipping {} - cannot list {}: {}", venue, dir.display(), e);
                return None;
            }
        };
        Some(
            files
                .iter()
                .map(|file| self.normalize_file(venue, file))
                .collect(),
        )
    }

    /// Process every configured venue in order
    pub fn run(&self) -> NormalizeReport {
        self.config
            .venues
            .iter()
            .fold(NormalizeReport::default(), |report, venue| {
                match self.normalize_venue(venue) {
                    Some(outcomes) => outcomes.iter().fold(report, NormalizeReport::record),
                    None => report.skip_dir(venue),
                }
            })
    }
}
