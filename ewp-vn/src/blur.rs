//! Blur placeholder table generation for venue images
//!
//! For every `.webp` in a venue directory: a 20px-wide WebP preview at quality
//! 20, inlined as a base64 data URI, plus the full image's size. Keys are the
//! public paths the site requests (`/images/venues/{venue}/{file}`).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ewp_common::blur_data::{venue_public_path, BlurDataEntry, BlurTable};
use ewp_common::imaging::{BackendError, ImageBackend, OutputFormat};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const PREVIEW_WIDTH: u32 = 20;
pub const PREVIEW_QUALITY: u8 = 20;

/// `data:image/webp;base64,...` for encoded WebP bytes
pub fn webp_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        OutputFormat::WebP.mime_type(),
        STANDARD.encode(bytes)
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlurReport {
    pub table: BlurTable,
    pub failed: usize,
}

pub struct BlurGenerator<'a, B: ImageBackend> {
    backend: &'a B,
    venues_root: &'a Path,
}

impl<'a, B: ImageBackend> BlurGenerator<'a, B> {
    pub fn new(backend: &'a B, venues_root: &'a Path) -> Self {
        Self {
            backend,
            venues_root,
        }
    }

    pub fn entry_for(&self, image: &Path) -> Result<BlurDataEntry, BackendError> {
        let preview = self.backend.preview(image, PREVIEW_WIDTH, PREVIEW_QUALITY)?;
        Ok(BlurDataEntry {
            blur: webp_data_uri(&preview.bytes),
            width: preview.source.width,
            height: preview.source.height,
        })
    }

    /// Entries for every WebP in the listed venue directories
    ///
    /// Missing directories contribute nothing; unreadable images are counted
    /// and left out of the table.
    pub fn generate(&self, venues: &[String]) -> BlurReport {
        let mut report = BlurReport::default();

        for venue in venues {
            let dir = self.venues_root.join(venue);
            let images = match webp_files(&dir) {
                Ok(images) => images,
                Err(e) => {
                    debug!("No blur data for {}: {}", venue, e);
                    continue;
                }
            };

            for image in images {
                let Some(file_name) = image.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                match self.entry_for(&image) {
                    Ok(entry) => {
                        report
                            .table
                            .insert(venue_public_path(venue, file_name), entry);
                    }
                    Err(e) => {
                        warn!("Blur preview failed for {}/{}: {}", venue, file_name, e);
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            "Generated {} blur placeholders ({} failed)",
            report.table.len(),
            report.failed
        );
        report
    }
}

fn webp_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_webp = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("webp"));
        if is_webp && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webp_data_uri() {
        assert_eq!(webp_data_uri(b"RIFF"), "data:image/webp;base64,UklGRg==");
    }

    #[test]
    fn test_webp_files_sorted_and_filtered() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["b.webp", "a.WEBP", "c-temp.jpg", "notes.txt"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        let names: Vec<_> = webp_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.WEBP", "b.webp"]);
    }
}
