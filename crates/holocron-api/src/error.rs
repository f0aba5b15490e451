//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use holocron_core::LookupError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Lookup(#[from] LookupError),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Lookup(LookupError::NotFound(_)) => StatusCode::NOT_FOUND,
      ApiError::Lookup(e) => {
        tracing::error!(id = %e.id(), stage = ?e.stage(), error = %e, "character lookup failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "character creation failed");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    let message = match self {
      ApiError::BadRequest(m) => m,
      other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
