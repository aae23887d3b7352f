//! ewp-ui library - Responsive image delivery
//!
//! Blur placeholder lookup, the progressive image component and gallery
//! `<picture>` rendering, venue image fallbacks, and a small preview server
//! that serves all of these next to the images tree.

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;

pub mod api;
pub mod blur_placeholders;
pub mod gallery;
pub mod image;
pub mod shimmer;
pub mod templates;
pub mod venue_images;

pub use blur_placeholders::{BlurPlaceholders, Placeholder, DEFAULT_BLUR};
pub use image::{ImageProps, LoadEvent, LoadState, OptimizedImage, PropsError};
pub use templates::Templates;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only placeholder table, loaded once at startup
    pub placeholders: Arc<BlurPlaceholders>,
    pub templates: Arc<Templates>,
    /// Served under `/images`
    pub images_root: PathBuf,
}

impl AppState {
    pub fn new(
        placeholders: BlurPlaceholders,
        images_root: PathBuf,
    ) -> Result<Self, handlebars::TemplateError> {
        Ok(Self {
            placeholders: Arc::new(placeholders),
            templates: Arc::new(Templates::new()?),
            images_root,
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    let images = ServeDir::new(&state.images_root);

    Router::new()
        .route("/api/blur", get(api::get_blur))
        .route("/api/blur/paths", get(api::list_blur_paths))
        .route("/api/render", get(api::render_image))
        .route("/api/gallery", get(api::render_gallery))
        .route("/api/venue-images", post(api::resolve_venue_images))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .nest_service("/images", images)
        .layer(TraceLayer::new_for_http())
        // Dev sites on other ports fetch fragments from here
        .layer(CorsLayer::permissive())
        .with_state(state)
}
