//! API error types.
//!
//! Every error ends up as a `{"error": "..."}` body. Internal failures are
//! logged with their detail and reported to the caller as `Server error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use notes_store::StoreError;

use crate::response::NoteResponse;

/// Message returned for any 500.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No usable device id in the header or body (400).
    #[error("Device ID is required")]
    MissingIdentity,

    /// Missing or blank required field, missing note id, unparseable body (400).
    #[error("{0}")]
    InvalidInput(String),

    /// Unmatched route, absent note, or note owned by another device (404).
    #[error("Not found")]
    NotFound,

    /// Anything else (500). The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingIdentity | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal(_) => SERVER_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => Self::NotFound,
            StoreError::InvalidInput(message) => Self::InvalidInput(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        NoteResponse::from_error(&self).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use notes_core::NoteId;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingIdentity.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_hidden() {
        let error = ApiError::Internal("connection refused on 10.0.0.5".into());
        assert_eq!(error.public_message(), "Server error");
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(ApiError::MissingIdentity.public_message(), "Device ID is required");
        assert_eq!(ApiError::NotFound.public_message(), "Not found");
        assert_eq!(
            ApiError::InvalidInput("Missing note ID".into()).public_message(),
            "Missing note ID"
        );
    }

    #[test]
    fn test_from_store_error() {
        let not_found: ApiError = StoreError::NotFound(NoteId::from("n1")).into();
        assert!(matches!(not_found, ApiError::NotFound));

        let invalid: ApiError = StoreError::InvalidInput("Title and content are required".into()).into();
        assert!(matches!(invalid, ApiError::InvalidInput(ref m) if m == "Title and content are required"));

        let duplicate: ApiError = StoreError::DuplicateNote(NoteId::from("n1")).into();
        assert!(matches!(duplicate, ApiError::Internal(_)));

        let config: ApiError = StoreError::ConfigError("bad".into()).into();
        assert_eq!(config.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
