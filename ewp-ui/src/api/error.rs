//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::image::PropsError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid {name}: {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("invalid image props: {0}")]
    InvalidProps(#[from] PropsError),

    #[error("render failed: {0}")]
    Render(String),
}

impl From<handlebars::RenderError> for ApiError {
    fn from(e: handlebars::RenderError) -> Self {
        ApiError::Render(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
