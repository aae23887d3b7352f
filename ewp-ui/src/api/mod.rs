//! HTTP API handlers for ewp-ui

pub mod blur;
pub mod buildinfo;
pub mod error;
pub mod health;
pub mod render;

pub use blur::{get_blur, list_blur_paths};
pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use health::health_routes;
pub use render::{render_gallery, render_image, resolve_venue_images};
