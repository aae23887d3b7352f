//! Image and gallery fragment rendering

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::gallery::{gallery_base_path, GalleryPicture};
use crate::image::{ImageProps, ImagePropsBuilder, LoadEvent, ObjectFit, OptimizedImage};
use crate::venue_images::{venue_gallery_images, venue_hero_image, venue_og_image, VenueImages};
use crate::AppState;

/// Query form of the image props
///
/// `preset` picks hero/card/avatar defaults; the other fields override them.
/// `events` replays load/error events (`load`, `error`, comma separated) to
/// preview the settled states.
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub preset: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Avatar diameter in pixels
    pub size: Option<u32>,
    pub fill: Option<bool>,
    pub priority: Option<bool>,
    pub quality: Option<u8>,
    pub sizes: Option<String>,
    /// Comma-separated widths, e.g. `640,1024,1920`
    pub breakpoints: Option<String>,
    pub blur: Option<String>,
    pub object_fit: Option<String>,
    pub object_position: Option<String>,
    pub class: Option<String>,
    pub events: Option<String>,
}

impl RenderQuery {
    fn builder(&self) -> Result<ImagePropsBuilder, ApiError> {
        let src = self.src.clone().ok_or(ApiError::MissingParameter("src"))?;
        let alt = self.alt.clone().unwrap_or_default();

        let mut builder = match self.preset.as_deref() {
            None | Some("") | Some("default") => ImageProps::builder(src, alt),
            Some("hero") => ImageProps::hero(src, alt),
            Some("card") => ImageProps::card(src, alt),
            Some("avatar") => ImageProps::avatar(src, alt, self.size.unwrap_or(64)),
            Some(other) => {
                return Err(ApiError::InvalidParameter {
                    name: "preset",
                    message: format!("unknown preset '{}'", other),
                })
            }
        };

        if let (Some(width), Some(height)) = (self.width, self.height) {
            builder = builder.size(width, height);
        }
        if self.fill == Some(true) {
            builder = builder.fill();
        }
        if let Some(priority) = self.priority {
            builder = builder.priority(priority);
        }
        if let Some(quality) = self.quality {
            builder = builder.quality(quality);
        }
        if let Some(sizes) = &self.sizes {
            builder = builder.sizes(sizes.clone());
        }
        if let Some(list) = &self.breakpoints {
            builder = builder.breakpoints(parse_widths(list)?);
        }
        if let Some(blur) = &self.blur {
            builder = builder.blur_data_url(blur.clone());
        }
        if let Some(fit) = &self.object_fit {
            let fit: ObjectFit = fit.parse().map_err(|message| ApiError::InvalidParameter {
                name: "object_fit",
                message,
            })?;
            builder = builder.object_fit(fit);
        }
        if let Some(position) = &self.object_position {
            builder = builder.object_position(position.clone());
        }
        if let Some(class) = &self.class {
            builder = builder.class_name(class.clone());
        }
        Ok(builder)
    }

    fn events(&self) -> Result<Vec<LoadEvent>, ApiError> {
        let Some(list) = &self.events else {
            return Ok(Vec::new());
        };
        list.split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(|e| match e {
                "load" => Ok(LoadEvent::Load),
                "error" => Ok(LoadEvent::Error),
                other => Err(ApiError::InvalidParameter {
                    name: "events",
                    message: format!("unknown event '{}'", other),
                }),
            })
            .collect()
    }
}

fn parse_widths(list: &str) -> Result<Vec<u32>, ApiError> {
    list.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<u32>().map_err(|e| ApiError::InvalidParameter {
                name: "breakpoints",
                message: format!("'{}': {}", w, e),
            })
        })
        .collect()
}

/// GET /api/render?src=...&alt=...&width=...&height=...
pub async fn render_image(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Html<String>, ApiError> {
    let props = query.builder()?.build()?;
    let events = query.events()?;

    let mut image = OptimizedImage::new(props, &state.placeholders);
    for event in events {
        image.handle(event);
    }
    Ok(Html(image.render(&state.templates)?))
}

#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    /// Base directory URL, e.g. `/images/gallery/couples`
    pub base: Option<String>,
    /// Alternative to `base`: a gallery category name
    pub category: Option<String>,
    pub name: Option<String>,
    pub alt: Option<String>,
    pub sizes: Option<String>,
    pub class: Option<String>,
}

/// GET /api/gallery?category=couples&name=couples-003&alt=...
pub async fn render_gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<Html<String>, ApiError> {
    let base = match (query.base, query.category) {
        (Some(base), _) => base,
        (None, Some(category)) => gallery_base_path(&category),
        (None, None) => return Err(ApiError::MissingParameter("base")),
    };
    let name = query.name.ok_or(ApiError::MissingParameter("name"))?;
    let alt = query.alt.unwrap_or_default();
    if alt.trim().is_empty() {
        return Err(ApiError::MissingParameter("alt"));
    }

    let mut picture = GalleryPicture::new(base, name, alt);
    if let Some(sizes) = query.sizes {
        picture = picture.with_sizes(sizes);
    }
    if let Some(class) = query.class {
        picture = picture.with_class(class);
    }
    Ok(Html(picture.render(&state.templates)?))
}

#[derive(Debug, Serialize)]
pub struct VenueImagesResponse {
    pub hero: String,
    pub og: String,
    pub gallery: Vec<String>,
}

/// POST /api/venue-images with a venue record's image fields
pub async fn resolve_venue_images(Json(venue): Json<VenueImages>) -> Json<VenueImagesResponse> {
    Json(VenueImagesResponse {
        hero: venue_hero_image(&venue).to_string(),
        og: venue_og_image(&venue).to_string(),
        gallery: venue_gallery_images(&venue)
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}
