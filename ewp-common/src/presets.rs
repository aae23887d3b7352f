//! Compression presets keyed by semantic image role
//!
//! A preset is a `{quality, width}` pair. The optimizer picks a preset by the
//! role of the image (hero, gallery, thumbnail, icon); the venue normalizer has
//! its own two-entry table (hero vs. everything else).
//!
//! Tables are built once at startup and handed to consumers by reference.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role used when an image's category does not name a known preset
pub const DEFAULT_ROLE: &str = "gallery";

/// Quality/width pair for one image role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionPreset {
    /// Encoder quality, 1..=100
    pub quality: u8,
    /// Maximum output width in pixels
    pub width: u32,
}

impl CompressionPreset {
    pub const fn new(quality: u8, width: u32) -> Self {
        Self { quality, width }
    }

    /// Quality for the secondary (AVIF) encode: five below the primary, never below 1
    pub fn secondary_quality(&self) -> u8 {
        self.quality.saturating_sub(5).max(1)
    }

    /// Reject presets the encoders cannot honor
    pub fn validate(&self, role: &str) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(Error::Config(format!(
                "preset '{}': quality {} outside 1..=100",
                role, self.quality
            )));
        }
        if self.width == 0 {
            return Err(Error::Config(format!("preset '{}': width must be > 0", role)));
        }
        Ok(())
    }
}

pub const HERO: CompressionPreset = CompressionPreset::new(75, 1920);
pub const GALLERY: CompressionPreset = CompressionPreset::new(70, 1200);
pub const THUMBNAIL: CompressionPreset = CompressionPreset::new(65, 400);
pub const ICON: CompressionPreset = CompressionPreset::new(80, 128);

/// Role → preset mapping used by the offline optimizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetTable {
    presets: BTreeMap<String, CompressionPreset>,
}

impl PresetTable {
    /// Build a table from explicit entries, validating each one
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, CompressionPreset)>,
        S: Into<String>,
    {
        let mut presets = BTreeMap::new();
        for (role, preset) in entries {
            let role = role.into();
            preset.validate(&role)?;
            presets.insert(role, preset);
        }
        Ok(Self { presets })
    }

    /// The built-in hero/gallery/thumbnail/icon table
    pub fn standard() -> Self {
        let presets = [
            ("hero", HERO),
            ("gallery", GALLERY),
            ("thumbnail", THUMBNAIL),
            ("icon", ICON),
        ]
        .into_iter()
        .map(|(role, preset)| (role.to_string(), preset))
        .collect();
        Self { presets }
    }

    /// Overlay per-role overrides from configuration (overrides win)
    pub fn merged(mut self, overrides: &BTreeMap<String, CompressionPreset>) -> Result<Self> {
        for (role, preset) in overrides {
            preset.validate(role)?;
            self.presets.insert(role.clone(), *preset);
        }
        Ok(self)
    }

    pub fn get(&self, role: &str) -> Option<&CompressionPreset> {
        self.presets.get(role)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.presets.contains_key(role)
    }

    /// Roles in sorted order
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Presets for the venue normalizer: hero images get the larger width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenuePresets {
    pub hero: CompressionPreset,
    pub other: CompressionPreset,
}

impl VenuePresets {
    pub const fn standard() -> Self {
        Self {
            hero: CompressionPreset::new(85, 1920),
            other: CompressionPreset::new(80, 1200),
        }
    }

    /// Hero when the file name mentions "hero", otherwise the general preset
    pub fn for_file_name(&self, file_name: &str) -> CompressionPreset {
        if file_name.contains("hero") {
            self.hero
        } else {
            self.other
        }
    }
}

impl Default for VenuePresets {
    fn default() -> Self {
        Self::standard()
    }
}
