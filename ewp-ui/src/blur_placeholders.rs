//! Blur placeholder lookup
//!
//! Maps a public image path to a tiny preview shown while the full image
//! loads. Built once from the table `ewp-vn --blur-data` writes, then shared
//! read-only (behind an `Arc`) by every render. Lookups never fail: untracked
//! paths get [`DEFAULT_BLUR`] at [`FALLBACK_WIDTH`]×[`FALLBACK_HEIGHT`].

use ewp_common::blur_data::{parse_blur_table, read_blur_table, BlurDataEntry};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Neutral 20×13 WebP used for any path without its own entry
pub const DEFAULT_BLUR: &str = "data:image/webp;base64,UklGRlQAAABXRUJQVlA4IEgAAACwAwCdASoUAA0APrVIn0mnJCKhMAgA4BaJYwCdABZ1XdczGSeQAAD+dB0l6fRwjEp5NU/89g1qqZFeq3IagL0SrrzwQWAAAAA=";

pub const FALLBACK_WIDTH: u32 = 1200;
pub const FALLBACK_HEIGHT: u32 = 800;

/// Placeholder plus the intrinsic size of the image it stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placeholder<'a> {
    pub blur: &'a str,
    pub width: u32,
    pub height: u32,
}

/// Immutable path → placeholder table
#[derive(Debug, Clone, Default)]
pub struct BlurPlaceholders {
    entries: HashMap<String, BlurDataEntry>,
}

impl BlurPlaceholders {
    /// A lookup with no entries; every path gets the default
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, BlurDataEntry)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parse the JSON table format
    pub fn from_json_str(json: &str) -> ewp_common::Result<Self> {
        Ok(Self::from_entries(parse_blur_table(json)?))
    }

    /// Read and parse a table file
    pub fn load(path: &Path) -> ewp_common::Result<Self> {
        Ok(Self::from_entries(read_blur_table(path)?))
    }

    /// Data URI for `path`, or [`DEFAULT_BLUR`] when untracked or empty
    pub fn get(&self, path: &str) -> &str {
        self.entries
            .get(path)
            .map(|entry| non_empty_blur(&entry.blur))
            .unwrap_or(DEFAULT_BLUR)
    }

    /// Data URI and dimensions for `path`, or the default at 1200×800
    pub fn get_with_dimensions(&self, path: &str) -> Placeholder<'_> {
        match self.entries.get(path) {
            Some(entry) => Placeholder {
                blur: non_empty_blur(&entry.blur),
                width: entry.width,
                height: entry.height,
            },
            None => Placeholder {
                blur: DEFAULT_BLUR,
                width: FALLBACK_WIDTH,
                height: FALLBACK_HEIGHT,
            },
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Every tracked path, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn non_empty_blur(blur: &str) -> &str {
    if blur.is_empty() {
        DEFAULT_BLUR
    } else {
        blur
    }
}
