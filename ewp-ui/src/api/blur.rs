//! Blur placeholder lookups

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BlurQuery {
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BlurResponse {
    pub path: String,
    pub blur: String,
    pub width: u32,
    pub height: u32,
    /// False when the default placeholder was returned
    pub tracked: bool,
}

/// GET /api/blur?path=/images/venues/w-goa/hero.webp
pub async fn get_blur(
    State(state): State<AppState>,
    Query(query): Query<BlurQuery>,
) -> Result<Json<BlurResponse>, ApiError> {
    let path = query.path.ok_or(ApiError::MissingParameter("path"))?;
    let placeholder = state.placeholders.get_with_dimensions(&path);

    Ok(Json(BlurResponse {
        blur: placeholder.blur.to_string(),
        width: placeholder.width,
        height: placeholder.height,
        tracked: state.placeholders.has(&path),
        path,
    }))
}

#[derive(Debug, Serialize)]
pub struct BlurPathsResponse {
    pub count: usize,
    pub paths: Vec<String>,
}

/// GET /api/blur/paths
pub async fn list_blur_paths(State(state): State<AppState>) -> Json<BlurPathsResponse> {
    let paths: Vec<String> = state
        .placeholders
        .paths()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(BlurPathsResponse {
        count: paths.len(),
        paths,
    })
}
