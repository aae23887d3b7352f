//! On-disk format of the blur placeholder table
//!
//! A JSON object keyed by public image path (`/images/venues/w-goa/hero.webp`),
//! each value carrying a data-URI preview and the full image's pixel size:
//!
//! ```json
//! {
//!   "/images/venues/w-goa/hero.webp": {
//!     "blur": "data:image/webp;base64,UklGR...",
//!     "width": 1920,
//!     "height": 1280
//!   }
//! }
//! ```
//!
//! Written by `ewp-vn --blur-data`, read by the placeholder lookup in `ewp-ui`.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One tracked image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlurDataEntry {
    /// Data URI of the low-resolution preview
    pub blur: String,
    pub width: u32,
    pub height: u32,
}

/// Path → entry, sorted so the serialized file is stable across runs
pub type BlurTable = BTreeMap<String, BlurDataEntry>;

/// Public URL path of a venue image, as used for blur table keys
pub fn venue_public_path(venue: &str, file_name: &str) -> String {
    format!("/images/venues/{}/{}", venue, file_name)
}

pub fn parse_blur_table(json: &str) -> Result<BlurTable> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_blur_table(path: &Path) -> Result<BlurTable> {
    let json = std::fs::read_to_string(path)?;
    parse_blur_table(&json)
}

/// Write the table as pretty JSON, keys in sorted order
pub fn write_blur_table(table: &BlurTable, path: &Path) -> Result<()> {
    crate::config::write_json_atomic(table, path)
}
