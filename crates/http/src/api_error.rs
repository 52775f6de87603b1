//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into proper HTTP responses with JSON body and status codes.
//! Handlers return `Result<Json<T>, ApiError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tom_catalog_core::TomError;
use tom_catalog_service::{Conflict, ServiceError};
use tom_catalog_storage::StorageError;

/// API error with HTTP status code and human-readable message.
///
/// Converts to JSON response: `{"error": "message"}`. Duplicates also carry
/// the conflicting targets: `{"error": "...", "conflicts": [{"id", "name"}]}`.
///
/// `Internal` variant logs the real error server-side and returns
/// a static message to the client; error details stay in the server log.
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request: invalid input from caller.
    BadRequest(String),
    /// 404 Not Found: requested resource doesn't exist.
    NotFound(String),
    /// 409 Conflict: the save would duplicate catalogued targets.
    Conflict { message: String, conflicts: Vec<Conflict> },
    /// 500 Internal Server Error: unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!({"error": msg})),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({"error": msg})),
            Self::Conflict { message, conflicts } => (
                StatusCode::CONFLICT,
                serde_json::json!({"error": message, "conflicts": conflicts}),
            ),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({"error": "internal server error"}),
                )
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<TomError> for ApiError {
    fn from(err: TomError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Duplicate { ref conflicts, .. } => {
                Self::Conflict { conflicts: conflicts.clone(), message: err.to_string() }
            },
            ServiceError::Storage(ref e) if e.is_duplicate() => {
                Self::Conflict { message: err.to_string(), conflicts: Vec::new() }
            },
            ServiceError::NotFound { entity, id }
            | ServiceError::Storage(StorageError::NotFound { entity, id }) => {
                Self::NotFound(format!("{entity} '{id}' not found"))
            },
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            _ => Self::Internal(err.into()),
        }
    }
}
