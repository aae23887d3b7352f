//! Source image discovery
//!
//! Walks the images root, keeping raster files whose extension is in the known
//! set. The output directory and hidden directories are never descended into,
//! so re-running the optimizer does not feed its own outputs back in.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Extensions accepted as optimizer input (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Image scanner errors
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A raster image found under the images root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
    /// First directory below the root (`None` for files directly in the root)
    pub category: Option<String>,
    /// File name without extension; output files are named after it
    pub stem: String,
    /// Size on disk in bytes
    pub bytes: u64,
}

/// Recursive image scanner
pub struct ImageScanner {
    ignore_patterns: Vec<String>,
    excluded_dirs: HashSet<PathBuf>,
}

impl ImageScanner {
    /// Create new scanner with default ignore patterns
    ///
    /// Ignores system files like .DS_Store, Thumbs.db, node_modules.
    pub fn new() -> Self {
        Self {
            ignore_patterns: vec![
                ".DS_Store".to_string(),
                "Thumbs.db".to_string(),
                "node_modules".to_string(),
            ],
            excluded_dirs: HashSet::new(),
        }
    }

    /// Never descend into `dir` (typically the optimizer output directory)
    pub fn exclude_dir(mut self, dir: &Path) -> Self {
        self.excluded_dirs.insert(normalize(dir));
        self
    }

    /// Scan `root` for images, sorted by path for deterministic runs
    pub fn scan(&self, root: &Path) -> Result<Vec<SourceImage>, ScanError> {
        if !root.exists() {
            return Err(ScanError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut images = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_image_extension(entry.path()) {
                continue;
            }

            let bytes = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    tracing::warn!("Cannot stat {}: {}", entry.path().display(), e);
                    continue;
                }
            };

            images.push(SourceImage {
                category: category_of(root, entry.path()),
                stem: entry
                    .path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path: entry.into_path(),
                bytes,
            });
        }

        tracing::debug!("Scan complete: {} images under {}", images.len(), root.display());
        Ok(images)
    }

    fn should_process_entry(&self, entry: &DirEntry) -> bool {
        // Root itself is always walked
        if entry.depth() == 0 {
            return true;
        }

        let file_name = entry.file_name().to_string_lossy();
        if self.ignore_patterns.iter().any(|p| file_name.contains(p.as_str())) {
            return false;
        }

        if entry.file_type().is_dir() {
            if file_name.starts_with('.') {
                return false;
            }
            if self.excluded_dirs.contains(&normalize(entry.path())) {
                return false;
            }
        }

        true
    }
}

impl Default for ImageScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the path's extension is one of [`IMAGE_EXTENSIONS`]
pub fn is_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn category_of(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = components.next()?;
    // A lone component is the file itself
    components.next()?;
    Some(first.as_os_str().to_string_lossy().into_owned())
}

fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
