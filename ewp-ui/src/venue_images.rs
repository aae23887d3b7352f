//! Venue image selection with category fallbacks
//!
//! A venue's own image is used when it is deliverable (a local `.webp` or an
//! Unsplash URL). Otherwise a stock image for the venue's category is used.

use serde::Deserialize;

struct FallbackSet {
    hero: &'static str,
    gallery: [&'static str; 6],
}

const PALACE: FallbackSet = FallbackSet {
    hero: "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=1920&q=80",
    gallery: [
        "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=1200&q=80",
        "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=1200&q=80",
        "https://images.unsplash.com/photo-1564501049412-61c2a3083791?w=1200&q=80",
        "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=1200&q=80",
        "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=1200&q=80",
        "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=1200&q=80",
    ],
};

const BEACH_RESORT: FallbackSet = FallbackSet {
    hero: "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=1920&q=80",
    gallery: [
        "https://images.unsplash.com/photo-1512343879784-a960bf40e7f2?w=1200&q=80",
        "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=1200&q=80",
        "https://images.unsplash.com/photo-1506929562872-bb421503ef21?w=1200&q=80",
        "https://images.unsplash.com/photo-1510414842594-a61c69b5ae57?w=1200&q=80",
        "https://images.unsplash.com/photo-1573843981267-be1999ff37cd?w=1200&q=80",
        "https://images.unsplash.com/photo-1540541338287-41700207dee6?w=1200&q=80",
    ],
};

const HERITAGE: FallbackSet = FallbackSet {
    hero: "https://images.unsplash.com/photo-1477587458883-47145ed94245?w=1920&q=80",
    gallery: [
        "https://images.unsplash.com/photo-1564501049412-61c2a3083791?w=1200&q=80",
        "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=1200&q=80",
        "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=1200&q=80",
        "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=1200&q=80",
        "https://images.unsplash.com/photo-1590490360182-c33d57733427?w=1200&q=80",
        "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=1200&q=80",
    ],
};

// Luxury Hotel and the default share one set
const LUXURY_HOTEL: FallbackSet = FallbackSet {
    hero: "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=1920&q=80",
    gallery: [
        "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=1200&q=80",
        "https://images.unsplash.com/photo-1564501049412-61c2a3083791?w=1200&q=80",
        "https://images.unsplash.com/photo-1520250497591-112f2f40a3f4?w=1200&q=80",
        "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=1200&q=80",
        "https://images.unsplash.com/photo-1551882547-ff40c63fe5fa?w=1200&q=80",
        "https://images.unsplash.com/photo-1542314831-068cd1dbfeeb?w=1200&q=80",
    ],
};

const DEFAULT: FallbackSet = LUXURY_HOTEL;

fn fallback_for(category: Option<&str>) -> &'static FallbackSet {
    match category {
        Some("Palace") => &PALACE,
        Some("Beach Resort") => &BEACH_RESORT,
        Some("Heritage") => &HERITAGE,
        Some("Luxury Hotel") => &LUXURY_HOTEL,
        _ => &DEFAULT,
    }
}

/// Image fields of a venue record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueImages {
    pub hero_image: Option<String>,
    pub og_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    pub category: Option<String>,
}

/// Local WebP or Unsplash URL
pub fn is_deliverable(url: &str) -> bool {
    url.ends_with(".webp") || url.contains("unsplash.com")
}

pub fn venue_hero_image(venue: &VenueImages) -> &str {
    match venue.hero_image.as_deref() {
        Some(hero) if is_deliverable(hero) => hero,
        _ => fallback_for(venue.category.as_deref()).hero,
    }
}

/// Dedicated social image (local WebP only), else the hero
pub fn venue_og_image(venue: &VenueImages) -> &str {
    match venue.og_image.as_deref() {
        Some(og) if og.ends_with(".webp") => og,
        _ => venue_hero_image(venue),
    }
}

/// The venue's gallery when every entry is deliverable, else the category set
pub fn venue_gallery_images(venue: &VenueImages) -> Vec<&str> {
    if !venue.gallery_images.is_empty() && venue.gallery_images.iter().all(|img| is_deliverable(img)) {
        return venue.gallery_images.iter().map(String::as_str).collect();
    }
    fallback_for(venue.category.as_deref()).gallery.to_vec()
}

pub fn venue_placeholder_image(category: Option<&str>) -> &'static str {
    fallback_for(category).hero
}
