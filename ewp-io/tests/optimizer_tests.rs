//! Integration tests for the offline optimizer
//!
//! Tests cover:
//! - Role preset selection from the category directory
//! - Width cap without upscaling, aspect ratio preserved
//! - WebP at preset quality, AVIF five lower
//! - Log-and-continue on per-file failures
//! - Re-runs: output directory never rescanned, outputs stable
//!
//! Most tests run against `RecordingBackend`, whose fixture "images" are text
//! files holding `WIDTHxHEIGHT`; one test drives the real encoder end to end.

use ewp_common::imaging::{
    BackendError, Dimensions, EncodeJob, EncodedVariant, Fit, ImageBackend, OutputFormat, Preview,
};
use ewp_common::presets::{CompressionPreset, PresetTable};
use ewp_common::RustBackend;
use ewp_io::{FileOutcome, Manifest, Optimizer, OptimizerConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Backend double: reads `WxH` from the source file, records every job and
/// writes a small text payload per output
#[derive(Default)]
struct RecordingBackend {
    jobs: Mutex<Vec<EncodeJob>>,
}

impl RecordingBackend {
    fn parse(path: &Path) -> Result<Dimensions, BackendError> {
        let text = fs::read_to_string(path).map_err(|source| BackendError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (w, h) = text
            .trim()
            .split_once('x')
            .ok_or_else(|| BackendError::decode(path, "corrupt header"))?;
        match (w.parse(), h.parse()) {
            (Ok(w), Ok(h)) => Ok(Dimensions::new(w, h)),
            _ => Err(BackendError::decode(path, "corrupt header")),
        }
    }

    fn recorded(&self) -> Vec<EncodeJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl ImageBackend for RecordingBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        Self::parse(path)
    }

    fn render(&self, source: &Path, jobs: &[EncodeJob]) -> Result<Vec<EncodedVariant>, BackendError> {
        Self::parse(source)?;
        let mut variants = Vec::new();
        for job in jobs {
            let payload = format!("{} {} q{}", job.format, job.target, job.quality);
            fs::write(&job.output, &payload).map_err(|source| BackendError::Write {
                path: job.output.clone(),
                source,
            })?;
            self.jobs.lock().unwrap().push(job.clone());
            variants.push(EncodedVariant {
                path: job.output.clone(),
                format: job.format,
                dimensions: job.target,
                quality: job.quality,
                bytes: payload.len() as u64,
            });
        }
        Ok(variants)
    }

    fn preview(&self, source: &Path, _width: u32, _quality: u8) -> Result<Preview, BackendError> {
        Err(BackendError::decode(source, "not supported by test double"))
    }
}

fn fixture(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn jobs_for<'a>(jobs: &'a [EncodeJob], stem: &str) -> Vec<&'a EncodeJob> {
    jobs.iter()
        .filter(|j| j.output.file_stem().unwrap().to_string_lossy() == stem)
        .collect()
}

#[test]
fn test_gallery_scenario_3000x2000() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "gallery/palace.jpg", "3000x2000");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);

    let plan = optimizer.plan().unwrap();
    let report = optimizer.run(&plan).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 0);

    let jobs = backend.recorded();
    assert_eq!(jobs.len(), 2);

    let webp = &jobs[0];
    assert_eq!(webp.format, OutputFormat::WebP);
    assert_eq!(webp.target, Dimensions::new(1200, 800));
    assert_eq!(webp.quality, 70);
    assert_eq!(webp.fit, Fit::Cover);
    assert_eq!(webp.output, dir.path().join("optimized/palace.webp"));

    let avif = &jobs[1];
    assert_eq!(avif.format, OutputFormat::Avif);
    assert_eq!(avif.target, Dimensions::new(1200, 800));
    assert_eq!(avif.quality, 65);
    assert_eq!(avif.output, dir.path().join("optimized/palace.avif"));

    assert!(dir.path().join("optimized/palace.webp").is_file());
    assert!(dir.path().join("optimized/palace.avif").is_file());
}

#[test]
fn test_narrow_source_is_not_upscaled() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "hero/small.png", "800x533");
    fixture(dir.path(), "thumbnail/exact.png", "400x300");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);
    optimizer.run(&optimizer.plan().unwrap()).unwrap();

    let jobs = backend.recorded();
    for job in jobs_for(&jobs, "small") {
        assert_eq!(job.target, Dimensions::new(800, 533));
    }
    for job in jobs_for(&jobs, "exact") {
        assert_eq!(job.target, Dimensions::new(400, 300));
    }
}

#[test]
fn test_aspect_ratio_rounding_per_role() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "hero/wide.jpg", "4000x2667");
    fixture(dir.path(), "thumbnail/odd.jpg", "1601x999");
    fixture(dir.path(), "icon/logo.png", "512x512");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);
    optimizer.run(&optimizer.plan().unwrap()).unwrap();

    let jobs = backend.recorded();
    // 1920 * 2667 / 4000 = 1280.16
    assert_eq!(jobs_for(&jobs, "wide")[0].target, Dimensions::new(1920, 1280));
    assert_eq!(jobs_for(&jobs, "wide")[0].quality, 75);
    // 400 * 999 / 1601 = 249.59
    assert_eq!(jobs_for(&jobs, "odd")[0].target, Dimensions::new(400, 250));
    assert_eq!(jobs_for(&jobs, "odd")[1].quality, 60);
    assert_eq!(jobs_for(&jobs, "logo")[0].target, Dimensions::new(128, 128));
    assert_eq!(jobs_for(&jobs, "logo")[1].quality, 75);
}

#[test]
fn test_unknown_category_and_root_files_use_default_role() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "couples/portrait.jpg", "2400x1600");
    fixture(dir.path(), "banner.jpg", "2400x1600");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);

    let plan = optimizer.plan().unwrap();
    assert!(plan.iter().all(|p| p.role == "gallery"));

    let report = optimizer.run(&plan).unwrap();
    assert_eq!(report.by_role.get("gallery"), Some(&2));
    assert!(backend
        .recorded()
        .iter()
        .all(|j| j.target == Dimensions::new(1200, 800)));
}

#[test]
fn test_custom_presets_and_default_role() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "decor/flowers.jpg", "1000x500");

    let mut config = OptimizerConfig::new(dir.path());
    config.presets = PresetTable::new([("decor", CompressionPreset::new(50, 500))]).unwrap();
    config.default_role = "decor".to_string();

    let backend = RecordingBackend::default();
    let optimizer = Optimizer::new(&backend, &config);
    optimizer.run(&optimizer.plan().unwrap()).unwrap();

    let jobs = backend.recorded();
    assert_eq!(jobs[0].target, Dimensions::new(500, 250));
    assert_eq!(jobs[0].quality, 50);
    assert_eq!(jobs[1].quality, 45);
}

#[test]
fn test_failure_is_logged_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "gallery/a-broken.jpg", "garbage");
    fixture(dir.path(), "gallery/b-good.jpg", "1600x1200");
    fixture(dir.path(), "gallery/c-empty.jpg", "0x0");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);

    let plan = optimizer.plan().unwrap();
    let outcomes: Vec<FileOutcome> = plan.iter().map(|p| optimizer.process(p)).collect();
    assert!(matches!(&outcomes[0], FileOutcome::Failed { file, .. } if file == "a-broken.jpg"));
    assert!(matches!(&outcomes[1], FileOutcome::Converted(_)));
    assert!(matches!(&outcomes[2], FileOutcome::Skipped { .. }));

    let report = optimizer.run(&plan).unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.failures[0].message.contains("corrupt header"));
    assert!(dir.path().join("optimized/b-good.webp").is_file());
    assert!(!dir.path().join("optimized/a-broken.webp").exists());
}

#[test]
fn test_sources_left_untouched() {
    let dir = TempDir::new().unwrap();
    let source = fixture(dir.path(), "hero/keep.jpg", "2000x1000");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);
    optimizer.run(&optimizer.plan().unwrap()).unwrap();

    assert_eq!(fs::read_to_string(&source).unwrap(), "2000x1000");
}

#[test]
fn test_rerun_skips_outputs_and_is_stable() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "gallery/one.jpg", "3000x2000");
    fixture(dir.path(), "icon/two.png", "256x256");

    let config = OptimizerConfig::new(dir.path());

    let first_backend = RecordingBackend::default();
    let first = Optimizer::new(&first_backend, &config);
    let first_plan = first.plan().unwrap();
    first.run(&first_plan).unwrap();
    let first_bytes = fs::read(dir.path().join("optimized/one.webp")).unwrap();

    // Outputs in `optimized/` must not become inputs
    let second_backend = RecordingBackend::default();
    let second = Optimizer::new(&second_backend, &config);
    let second_plan = second.plan().unwrap();
    assert_eq!(second_plan.len(), first_plan.len());
    second.run(&second_plan).unwrap();

    assert_eq!(first_backend.recorded(), second_backend.recorded());
    assert_eq!(fs::read(dir.path().join("optimized/one.webp")).unwrap(), first_bytes);
}

#[test]
fn test_output_dir_created() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "gallery/one.jpg", "300x200");

    let mut config = OptimizerConfig::new(dir.path());
    config.output_dir = dir.path().join("build").join("img");

    let backend = RecordingBackend::default();
    let optimizer = Optimizer::new(&backend, &config);
    optimizer.run(&optimizer.plan().unwrap()).unwrap();

    assert!(dir.path().join("build/img/one.webp").is_file());
    assert!(dir.path().join("build/img/one.avif").is_file());
}

#[test]
fn test_process_single_file_creates_output_dir() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "gallery/solo.jpg", "1600x1200");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);
    assert!(!config.output_dir.exists());

    let plan = optimizer.plan().unwrap();
    let outcome = optimizer.process(&plan[0]);

    assert!(matches!(outcome, FileOutcome::Converted(_)), "{:?}", outcome);
    assert!(dir.path().join("optimized/solo.webp").is_file());
    assert!(dir.path().join("optimized/solo.avif").is_file());
}

#[test]
fn test_manifest_written_to_output_dir() {
    let dir = TempDir::new().unwrap();
    fixture(dir.path(), "hero/one.jpg", "3000x2000");

    let backend = RecordingBackend::default();
    let config = OptimizerConfig::new(dir.path());
    let optimizer = Optimizer::new(&backend, &config);
    let report = optimizer.run(&optimizer.plan().unwrap()).unwrap();

    Manifest::from_report(&report, chrono::Utc::now())
        .write(&config.output_dir)
        .unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.output_dir.join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["statistics"]["total_images"], 1);
    assert_eq!(manifest["roles"]["hero"]["count"], 1);
}

#[test]
fn test_real_backend_end_to_end() {
    let dir = TempDir::new().unwrap();
    let gallery = dir.path().join("gallery");
    fs::create_dir_all(&gallery).unwrap();
    let source = gallery.join("real.jpg");
    image::RgbImage::from_fn(96, 64, |x, y| image::Rgb([(x * 2) as u8, (y * 3) as u8, 90]))
        .save(&source)
        .unwrap();

    let mut config = OptimizerConfig::new(dir.path());
    config.presets = PresetTable::new([("gallery", CompressionPreset::new(70, 48))]).unwrap();

    let backend = RustBackend::new();
    let optimizer = Optimizer::new(&backend, &config);
    let plan = optimizer.plan().unwrap();
    let report = optimizer.run(&plan).unwrap();
    assert_eq!(report.processed, 1, "failures: {:?}", report.failures);

    let webp = dir.path().join("optimized/real.webp");
    let avif = dir.path().join("optimized/real.avif");
    assert_eq!(image::image_dimensions(&webp).unwrap(), (48, 32));
    assert!(fs::metadata(&avif).unwrap().len() > 0);

    // Deterministic re-run
    let first = fs::read(&webp).unwrap();
    optimizer.run(&optimizer.plan().unwrap()).unwrap();
    assert_eq!(fs::read(&webp).unwrap(), first);
}
