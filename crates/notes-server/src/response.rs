//! Response formatting.
//!
//! Every response, success or failure, carries the same CORS headers. Bodies
//! are either empty or JSON.

use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use http::{
    HeaderMap, HeaderValue, StatusCode,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        CONTENT_TYPE,
    },
};
use serde::Serialize;

use crate::error::{ApiError, SERVER_ERROR_MESSAGE};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type,x-device-id";

/// The fixed cross-origin header set.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A transport-independent response envelope.
#[derive(Debug, Clone)]
pub struct NoteResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl NoteResponse {
    /// Empty body with the CORS headers.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: cors_headers(),
            body: String::new(),
        }
    }

    /// JSON body with the CORS headers and `Content-Type: application/json`.
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self::json_text(status, body),
            Err(e) => Self::from_error(&ApiError::Internal(format!(
                "failed to serialize response: {}",
                e
            ))),
        }
    }

    /// Error body `{"error": ...}`. 500s are logged with their detail.
    pub fn from_error(error: &ApiError) -> Self {
        let status = error.status_code();
        if status.is_server_error() {
            tracing::error!(error = %error, "Unhandled error");
        }

        let body = ErrorBody {
            error: error.public_message(),
        };
        match serde_json::to_string(&body) {
            Ok(text) => Self::json_text(status, text),
            Err(_) => Self::json_text(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{{\"error\":\"{}\"}}", SERVER_ERROR_MESSAGE),
            ),
        }
    }

    fn json_text(status: StatusCode, body: String) -> Self {
        let mut headers = cors_headers();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Self {
            status,
            headers,
            body,
        }
    }
}

impl From<ApiError> for NoteResponse {
    fn from(error: ApiError) -> Self {
        Self::from_error(&error)
    }
}

impl IntoResponse for NoteResponse {
    fn into_response(self) -> Response {
        (self.status, self.headers, Body::from(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_cors(headers: &HeaderMap) {
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,PUT,DELETE,OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type,x-device-id");
    }

    #[test]
    fn test_empty_response() {
        let response = NoteResponse::empty(StatusCode::NO_CONTENT);
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_empty());
        assert_cors(&response.headers);
        assert!(response.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_json_response() {
        let response = NoteResponse::json(
            StatusCode::CREATED,
            &serde_json::json!({ "note_id": "abc" }),
        );
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body, r#"{"note_id":"abc"}"#);
        assert_eq!(response.headers[CONTENT_TYPE], "application/json");
        assert_cors(&response.headers);
    }

    #[test]
    fn test_error_response() {
        let response = NoteResponse::from_error(&ApiError::MissingIdentity);
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, r#"{"error":"Device ID is required"}"#);
        assert_cors(&response.headers);
    }

    #[test]
    fn test_internal_error_is_generic() {
        let response: NoteResponse = ApiError::Internal("db password wrong".into()).into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, r#"{"error":"Server error"}"#);
    }
}
