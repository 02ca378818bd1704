//! Device identity extraction.
//!
//! Priority:
//! 1. `x-device-id` header (any case).
//! 2. A string `device_id` field in a JSON object body.
//!
//! The value is trimmed; blank values count as absent. A body that is not
//! valid JSON is treated as carrying no identity rather than as an error.

use http::HeaderMap;
use notes_core::DeviceId;
use serde_json::Value;

use crate::error::ApiError;
use crate::request::NoteRequest;

/// Header carrying the caller's device id.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// Body field consulted when the header is absent.
pub const DEVICE_ID_FIELD: &str = "device_id";

/// Resolve the caller's device id or fail with `MissingIdentity`.
pub fn extract_device_id(request: &NoteRequest) -> Result<DeviceId, ApiError> {
    from_header(&request.headers)
        .or_else(|| request.body.as_deref().and_then(from_body))
        .ok_or(ApiError::MissingIdentity)
}

fn from_header(headers: &HeaderMap) -> Option<DeviceId> {
    headers
        .get(DEVICE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(DeviceId::parse)
}

fn from_body(body: &str) -> Option<DeviceId> {
    let payload: Value = serde_json::from_str(body).ok()?;
    payload
        .get(DEVICE_ID_FIELD)
        .and_then(Value::as_str)
        .and_then(DeviceId::parse)
}
