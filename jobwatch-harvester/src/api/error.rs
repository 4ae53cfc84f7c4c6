//! API Error Handling
//!
//! Failures are reported in the same envelope as successful scrapes so that
//! callers only ever decode one body shape.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jobwatch_core::dto::scrape::ScrapeResponse;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ScrapeResponse::failed(message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
