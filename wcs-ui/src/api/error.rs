//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors returned by catalog handlers
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or empty request value
    BadRequest(String),
    /// Operation not allowed in the current load state
    Conflict(String),
    Internal(String),
}

impl From<wcs_common::Error> for ApiError {
    fn from(err: wcs_common::Error) -> Self {
        match err {
            wcs_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            wcs_common::Error::InvalidState(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
