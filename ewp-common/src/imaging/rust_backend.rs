//! Production backend: `image` for decode/resize/AVIF, libwebp for WebP

use super::backend::{
    BackendError, Dimensions, EncodeJob, EncodedVariant, Fit, ImageBackend, OutputFormat, Preview,
};
use super::calculations::{fit_inside, fit_to_width};
use image::codecs::avif::AvifEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use std::path::Path;
use tracing::debug;

/// rav1e speed preset (1 = slowest/best, 10 = fastest)
const AVIF_SPEED: u8 = 6;

/// Backend built on pure-Rust decoding plus libwebp
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }

    fn decode(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let reader = ImageReader::open(path)
            .map_err(|source| BackendError::Read {
                path: path.to_path_buf(),
                source,
            })?
            .with_guessed_format()
            .map_err(|source| BackendError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        reader
            .decode()
            .map_err(|e| BackendError::decode(path, e.to_string()))
    }

    fn resize(image: &DynamicImage, target: Dimensions, fit: Fit) -> DynamicImage {
        let source = Dimensions::new(image.width(), image.height());
        if source == target {
            return image.clone();
        }
        match fit {
            Fit::Cover => image.resize_to_fill(target.width, target.height, FilterType::Lanczos3),
            Fit::Contain => {
                let fitted = fit_inside(source, target);
                image.resize_exact(fitted.width, fitted.height, FilterType::Lanczos3)
            }
        }
    }

    fn encode(
        image: &DynamicImage,
        format: OutputFormat,
        quality: u8,
        effort: Option<u8>,
    ) -> Result<Vec<u8>, BackendError> {
        match format {
            OutputFormat::WebP => encode_webp(image, quality, effort),
            OutputFormat::Avif => encode_avif(image, quality),
        }
    }
}

fn encode_webp(image: &DynamicImage, quality: u8, effort: Option<u8>) -> Result<Vec<u8>, BackendError> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());

    let mut config = webp::WebPConfig::new().map_err(|_| BackendError::Encode {
        format: OutputFormat::WebP,
        message: "cannot initialise encoder config".to_string(),
    })?;
    config.quality = quality as f32;
    if let Some(effort) = effort {
        config.method = i32::from(effort.min(6));
    }

    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| BackendError::Encode {
            format: OutputFormat::WebP,
            message: format!("{:?}", e),
        })?;
    Ok(memory.to_vec())
}

fn encode_avif(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, BackendError> {
    let rgba = image.to_rgba8();
    let mut buffer = Vec::new();
    AvifEncoder::new_with_speed_quality(&mut buffer, AVIF_SPEED, quality)
        .write_image(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| BackendError::Encode {
            format: OutputFormat::Avif,
            message: e.to_string(),
        })?;
    Ok(buffer)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::decode(path, e.to_string()))?;
        Ok(Dimensions::new(width, height))
    }

    fn render(&self, source: &Path, jobs: &[EncodeJob]) -> Result<Vec<EncodedVariant>, BackendError> {
        let decoded = self.decode(source)?;
        let mut variants = Vec::with_capacity(jobs.len());

        for job in jobs {
            let resized = Self::resize(&decoded, job.target, job.fit);
            let bytes = Self::encode(&resized, job.format, job.quality, job.effort)?;

            std::fs::write(&job.output, &bytes).map_err(|source| BackendError::Write {
                path: job.output.clone(),
                source,
            })?;
            debug!(
                "Wrote {} ({}, q{}, {} bytes)",
                job.output.display(),
                job.format,
                job.quality,
                bytes.len()
            );

            variants.push(EncodedVariant {
                path: job.output.clone(),
                format: job.format,
                dimensions: Dimensions::new(resized.width(), resized.height()),
                quality: job.quality,
                bytes: bytes.len() as u64,
            });
        }

        Ok(variants)
    }

    fn preview(&self, source: &Path, width: u32, quality: u8) -> Result<Preview, BackendError> {
        let decoded = self.decode(source)?;
        let full = Dimensions::new(decoded.width(), decoded.height());
        if full.is_empty() {
            return Err(BackendError::decode(source, "image has no pixels"));
        }

        let target = fit_to_width(full, width);
        let small = decoded.resize_exact(target.width, target.height, FilterType::Triangle);
        let bytes = encode_webp(&small, quality, None)?;

        Ok(Preview {
            bytes,
            source: full,
            preview: target,
        })
    }
}
