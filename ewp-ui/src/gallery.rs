//! Gallery images and their responsive source sets
//!
//! Gallery photos are published as four WebP widths plus one AVIF:
//!
//! | suffix   | width |
//! |----------|-------|
//! | `-thumb` | 400   |
//! | `-md`    | 800   |
//! | `-lg`    | 1200  |
//! | `-hero`  | 1920  |
//!
//! `{base}/{name}-hero.avif` is offered to wide viewports only; `-lg.webp`
//! is the plain `<img>` fallback.

use crate::image::DEFAULT_SIZES;
use crate::templates::{Templates, GALLERY_TEMPLATE};
use serde::Serialize;

/// Media query for the AVIF source
pub const AVIF_MEDIA: &str = "(min-width: 1200px)";

/// Published WebP widths, narrowest first
pub const GALLERY_WIDTHS: [(&str, u32); 4] = [("thumb", 400), ("md", 800), ("lg", 1200), ("hero", 1920)];

/// Gallery categories present under `/images/gallery`
pub const GALLERY_CATEGORIES: [&str; 8] = [
    "couples",
    "venues",
    "decor",
    "ceremonies",
    "entertainment",
    "food",
    "guests",
    "portfolio",
];

pub fn gallery_base_path(category: &str) -> String {
    format!("/images/gallery/{}", category)
}

/// `{base}/{name}-thumb.webp 400w, ... , {base}/{name}-hero.webp 1920w`
pub fn generate_src_set(base_path: &str, image_name: &str) -> String {
    GALLERY_WIDTHS
        .iter()
        .map(|(suffix, width)| format!("{}/{}-{}.webp {}w", base_path, image_name, suffix, width))
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebpSource {
    pub src_set: String,
    pub sizes: String,
}

/// Sources for a `<picture>`: AVIF for wide screens, WebP width list otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PictureSources {
    pub avif: String,
    pub webp: WebpSource,
}

pub fn picture_sources(base_path: &str, image_name: &str) -> PictureSources {
    PictureSources {
        avif: format!("{}/{}-hero.avif", base_path, image_name),
        webp: WebpSource {
            src_set: generate_src_set(base_path, image_name),
            sizes: DEFAULT_SIZES.to_string(),
        },
    }
}

/// `src`/`srcset`/`sizes` for a plain responsive `<img>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveImageProps {
    pub src: String,
    pub src_set: String,
    pub sizes: String,
}

pub fn responsive_image_props(base_path: &str, image_name: &str) -> ResponsiveImageProps {
    ResponsiveImageProps {
        src: format!("{}/{}-lg.webp", base_path, image_name),
        src_set: generate_src_set(base_path, image_name),
        sizes: DEFAULT_SIZES.to_string(),
    }
}

/// A gallery `<picture>` with its fade-in state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPicture {
    pub base_path: String,
    pub image_name: String,
    pub alt: String,
    pub class_name: String,
    pub sizes: String,
    loaded: bool,
}

impl GalleryPicture {
    pub fn new(
        base_path: impl Into<String>,
        image_name: impl Into<String>,
        alt: impl Into<String>,
    ) -> Self {
        Self {
            base_path: base_path.into().trim_end_matches('/').to_string(),
            image_name: image_name.into(),
            alt: alt.into(),
            class_name: String::new(),
            sizes: DEFAULT_SIZES.to_string(),
            loaded: false,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_name = class.into();
        self
    }

    pub fn with_sizes(mut self, sizes: impl Into<String>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// The fallback `<img>` finished loading
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn view(&self) -> GalleryView {
        let mut sources = picture_sources(&self.base_path, &self.image_name);
        sources.webp.sizes = self.sizes.clone();

        GalleryView {
            class: format!("block overflow-hidden {}", self.class_name)
                .trim_end()
                .to_string(),
            avif_media: AVIF_MEDIA,
            fallback: format!("{}/{}-lg.webp", self.base_path, self.image_name),
            alt: self.alt.clone(),
            img_class: format!(
                "w-full h-full object-cover transition-all duration-500 {}",
                if self.loaded { "opacity-100" } else { "opacity-0" }
            ),
            sources,
        }
    }

    pub fn render(&self, templates: &Templates) -> Result<String, handlebars::RenderError> {
        templates.render(GALLERY_TEMPLATE, &self.view())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub class: String,
    pub avif_media: &'static str,
    pub fallback: String,
    pub alt: String,
    pub img_class: String,
    pub sources: PictureSources,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/images/gallery/couples";

    #[test]
    fn test_generate_src_set() {
        assert_eq!(
            generate_src_set(BASE, "couples-003"),
            "/images/gallery/couples/couples-003-thumb.webp 400w, \
             /images/gallery/couples/couples-003-md.webp 800w, \
             /images/gallery/couples/couples-003-lg.webp 1200w, \
             /images/gallery/couples/couples-003-hero.webp 1920w"
        );
    }

    #[test]
    fn test_picture_sources() {
        let sources = picture_sources(BASE, "couples-003");
        assert_eq!(sources.avif, "/images/gallery/couples/couples-003-hero.avif");
        assert_eq!(sources.webp.sizes, DEFAULT_SIZES);
        assert_eq!(sources.webp.src_set, generate_src_set(BASE, "couples-003"));
    }

    #[test]
    fn test_responsive_image_props() {
        let props = responsive_image_props(&gallery_base_path("decor"), "decor-022");
        assert_eq!(props.src, "/images/gallery/decor/decor-022-lg.webp");
        assert!(props.src_set.ends_with("decor-022-hero.webp 1920w"));
    }

    #[test]
    fn test_gallery_view_fades_in() {
        let mut picture = GalleryPicture::new("/images/gallery/venues/", "venues-006", "Ballroom")
            .with_class("rounded-lg");
        let view = picture.view();
        assert_eq!(view.class, "block overflow-hidden rounded-lg");
        assert_eq!(view.fallback, "/images/gallery/venues/venues-006-lg.webp");
        assert!(view.img_class.ends_with("opacity-0"));

        picture.mark_loaded();
        assert!(picture.view().img_class.ends_with("opacity-100"));
    }

    #[test]
    fn test_render_picture() {
        let templates = Templates::new().unwrap();
        let html = GalleryPicture::new(BASE, "couples-023", "Couple portrait")
            .with_sizes("50vw")
            .render(&templates)
            .unwrap();

        assert!(html.contains(
            r#"<source type="image/avif" srcset="/images/gallery/couples/couples-023-hero.avif" media="(min-width: 1200px)">"#
        ));
        assert!(html.contains(r#"sizes="50vw""#));
        assert!(html.contains("couples-023-md.webp 800w"));
        assert!(html.contains(
            r#"<img src="/images/gallery/couples/couples-023-lg.webp" alt="Couple portrait" loading="lazy" decoding="async""#
        ));
        assert_eq!(html.matches("<source").count(), 2);
    }
}
