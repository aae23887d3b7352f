//! Image processing for the batch tools
//!
//! | Operation | Implementation |
//! |---|---|
//! | **Identify** (dimensions) | `image::image_dimensions` |
//! | **Resize** | Lanczos3; `resize_to_fill` for cover, exact resize into the fitted box for contain |
//! | **WebP** | libwebp via the `webp` crate (lossy, quality + effort) |
//! | **AVIF** | `image`'s rav1e-backed `AvifEncoder` |
//! | **Preview** | tiny Triangle-filtered WebP for blur placeholders |
//!
//! The [`ImageBackend`] trait keeps *what* to do (targets computed by
//! [`calculations`]) apart from *how* pixels are produced, so batch logic can be
//! exercised with test doubles.

pub mod backend;
pub mod calculations;
pub mod rust_backend;

pub use backend::{
    BackendError, Dimensions, EncodeJob, EncodedVariant, Fit, ImageBackend, OutputFormat, Preview,
};
pub use calculations::{fit_inside, fit_to_width, scaled_height};
pub use rust_backend::RustBackend;
