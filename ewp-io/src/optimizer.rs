//! Offline optimizer
//!
//! For every source image: pick the role preset from its category directory,
//! cap the width (never upscaling, aspect preserved), crop-to-cover into that
//! box and encode two variants into the flat output directory:
//!
//! - `{stem}.webp` at the preset quality
//! - `{stem}.avif` at the preset quality minus five
//!
//! Sources are left untouched. Files are processed one at a time in sorted
//! order; a failure is logged and counted, never fatal to the batch.

use crate::report::{BatchReport, ConvertedImage, FileOutcome};
use crate::scanner::{ImageScanner, ScanError, SourceImage};
use ewp_common::imaging::{fit_to_width, Dimensions, EncodeJob, Fit, ImageBackend, OutputFormat};
use ewp_common::presets::{CompressionPreset, PresetTable, DEFAULT_ROLE};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Settings for one optimizer run
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub images_root: PathBuf,
    pub output_dir: PathBuf,
    pub presets: PresetTable,
    /// Role for categories without a preset; must exist in `presets`
    pub default_role: String,
}

impl OptimizerConfig {
    /// Standard presets, output under `{images_root}/optimized`
    pub fn new(images_root: impl Into<PathBuf>) -> Self {
        let images_root = images_root.into();
        Self {
            output_dir: images_root.join("optimized"),
            images_root,
            presets: PresetTable::standard(),
            default_role: DEFAULT_ROLE.to_string(),
        }
    }
}

/// A conversion decided before any pixels are touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedConversion {
    pub source: SourceImage,
    pub role: String,
    pub preset: CompressionPreset,
}

impl PlannedConversion {
    /// Encode jobs for a source of the given dimensions
    pub fn jobs(&self, output_dir: &Path, source_dimensions: Dimensions) -> Vec<EncodeJob> {
        let target = fit_to_width(source_dimensions, self.preset.width);
        [
            (OutputFormat::WebP, self.preset.quality),
            (OutputFormat::Avif, self.preset.secondary_quality()),
        ]
        .into_iter()
        .map(|(format, quality)| EncodeJob {
            output: output_dir.join(format!("{}.{}", self.source.stem, format.extension())),
            format,
            quality,
            target,
            fit: Fit::Cover,
            effort: None,
        })
        .collect()
    }
}

/// Optimizer over an injected backend
pub struct Optimizer<'a, B: ImageBackend> {
    backend: &'a B,
    config: &'a OptimizerConfig,
}

impl<'a, B: ImageBackend> Optimizer<'a, B> {
    pub fn new(backend: &'a B, config: &'a OptimizerConfig) -> Self {
        Self { backend, config }
    }

    /// Scan the images root and assign a preset to every source
    pub fn plan(&self) -> Result<Vec<PlannedConversion>, ScanError> {
        let scanner = ImageScanner::new().exclude_dir(&self.config.output_dir);
        let sources = scanner.scan(&self.config.images_root)?;

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut plan = Vec::with_capacity(sources.len());
        for source in sources {
            if let Some(previous) = seen.insert(source.stem.clone(), source.path.clone()) {
                warn!(
                    "Output name collision: {} overwrites outputs of {}",
                    source.path.display(),
                    previous.display()
                );
            }

            let (role, preset) = self.preset_for(source.category.as_deref());
            plan.push(PlannedConversion {
                source,
                role,
                preset,
            });
        }
        Ok(plan)
    }

    /// Role and preset for a category, falling back to the default role
    pub fn preset_for(&self, category: Option<&str>) -> (String, CompressionPreset) {
        if let Some(category) = category {
            if let Some(preset) = self.config.presets.get(category) {
                return (category.to_string(), *preset);
            }
        }
        let preset = self
            .config
            .presets
            .get(&self.config.default_role)
            .copied()
            .unwrap_or(ewp_common::presets::GALLERY);
        (self.config.default_role.clone(), preset)
    }

    /// Process one planned conversion to completion
    ///
    /// Creates the output directory when it is missing, so a single file can
    /// be converted without going through [`Optimizer::run`].
    pub fn process(&self, planned: &PlannedConversion) -> FileOutcome {
        let file = display_name(&planned.source.path);

        let dimensions = match self.backend.identify(&planned.source.path) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                error!("✗ {}: {}", file, e);
                return FileOutcome::Failed {
                    file,
                    message: e.to_string(),
                };
            }
        };
        if dimensions.is_empty() {
            warn!("Skipping {}: image has zero dimensions", file);
            return FileOutcome::Skipped {
                file,
                reason: "zero dimensions".to_string(),
            };
        }

        if let Err(e) = std::fs::create_dir_all(&self.config.output_dir) {
            error!("✗ {}: cannot create {}: {}", file, self.config.output_dir.display(), e);
            return FileOutcome::Failed {
                file,
                message: format!("cannot create {}: {}", self.config.output_dir.display(), e),
            };
        }

        let jobs = planned.jobs(&self.config.output_dir, dimensions);
        match self.backend.render(&planned.source.path, &jobs) {
            Ok(variants) => {
                let converted = ConvertedImage {
                    source: planned.source.path.clone(),
                    role: planned.role.clone(),
                    source_dimensions: dimensions,
                    input_bytes: planned.source.bytes,
                    variants,
                };
                info!(
                    "✓ {} [{}] {} -> {} ({} bytes)",
                    file,
                    planned.role,
                    dimensions,
                    jobs[0].target,
                    converted.output_bytes()
                );
                FileOutcome::Converted(converted)
            }
            Err(e) => {
                error!("✗ {}: {}", file, e);
                FileOutcome::Failed {
                    file,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Run a planned batch sequentially, folding outcomes into a report
    ///
    /// Creates the output directory if absent; failing to do so is the only
    /// error that stops the batch.
    pub fn run(&self, plan: &[PlannedConversion]) -> std::io::Result<BatchReport> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let report = plan
            .iter()
            .map(|planned| self.process(planned))
            .fold(BatchReport::default(), |report, outcome| report.record(&outcome));
        Ok(report)
    }

    /// Log what a run would do without writing anything
    pub fn dry_run(&self, plan: &[PlannedConversion]) {
        for planned in plan {
            let file = display_name(&planned.source.path);
            match self.backend.identify(&planned.source.path) {
                Ok(dimensions) => {
                    let target = fit_to_width(dimensions, planned.preset.width);
                    info!(
                        "{} [{}] {} -> {} (webp q{}, avif q{})",
                        file,
                        planned.role,
                        dimensions,
                        target,
                        planned.preset.quality,
                        planned.preset.secondary_quality()
                    );
                }
                Err(e) => warn!("{} [{}] unreadable: {}", file, planned.role, e),
            }
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
