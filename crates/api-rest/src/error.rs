//! Conversion of handler failures into HTTP responses.
//!
//! Model endpoints answer with plain text, JSON endpoints with an `{"error": ...}` body.

use crate::upstream::GeocodeError;
use api_shared::ErrorRes;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use twin_files::FilesError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Files(#[from] FilesError),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    /// Invalid JSON request; answered as 400 `{"error": ...}`
    #[error("{0}")]
    BadRequest(String),

    /// An upstream service failed; answered as 500 `{"error": ...}`
    #[error("{0}")]
    Upstream(String),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl From<GeocodeError> for ApiError {
    fn from(e: GeocodeError) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Files(e) => files_response(e),
            Self::Multipart(e) => e.into_response(),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorRes::new(message))).into_response()
            }
            Self::Upstream(message) => {
                tracing::warn!("upstream request failed: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorRes::new(message))).into_response()
            }
            Self::Join(e) => {
                tracing::error!("background task failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

fn files_response(e: FilesError) -> Response {
    match e {
        FilesError::MissingFile
        | FilesError::EmptyFilename
        | FilesError::UnsupportedExtension { .. }
        | FilesError::InvalidFilename(_) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        FilesError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        FilesError::StorageUnavailable(detail) => {
            tracing::error!("model storage unavailable: {detail}");
            (StatusCode::SERVICE_UNAVAILABLE, "Model storage unavailable").into_response()
        }
        FilesError::Io(err) => {
            tracing::error!("model storage I/O error: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
