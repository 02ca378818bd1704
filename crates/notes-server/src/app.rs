//! HTTP binding.
//!
//! Every request, whatever its method or path, is converted into a
//! [`NoteRequest`] and handed to the [`NoteRouter`](crate::NoteRouter). The
//! router owns all routing decisions, including CORS preflight and 404s, so
//! axum only contributes a single fallback handler plus middleware.
//!
//! The body is read here rather than through the `Bytes` extractor so that an
//! oversized or non-UTF-8 body still reaches the router and gets the standard
//! envelope.

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, Uri},
    middleware,
};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_request_span, propagate_request_id, request_id_layer};
use crate::request::{BodyError, NoteRequest};
use crate::response::NoteResponse;
use crate::state::AppState;

/// Largest request body read, in bytes.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Convert an HTTP request into a [`NoteRequest`].
///
/// An empty body is treated as absent.
pub fn to_note_request(
    method: Method,
    uri: &Uri,
    headers: HeaderMap,
    body: Result<Bytes, BodyError>,
) -> NoteRequest {
    let mut request = NoteRequest::new(method, uri.path());
    request.headers = headers;

    match body {
        Ok(bytes) if bytes.is_empty() => request,
        Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => request.with_body(text),
            Err(_) => request.with_body_error(BodyError::NotUtf8),
        },
        Err(error) => request.with_body_error(error),
    }
}

/// Fallback handler: every request goes through the note router.
async fn dispatch(State(state): State<AppState>, request: Request) -> NoteResponse {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            tracing::warn!(error = %e, limit = MAX_BODY_BYTES, "Failed to read request body");
            Err(BodyError::TooLarge)
        }
    };

    let request = to_note_request(parts.method, &parts.uri, parts.headers, body);
    state.router().handle(request).await
}

/// Build the complete application with middleware.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(middleware::from_fn(propagate_request_id))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(request_id_layer())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(raw: &str) -> Uri {
        raw.parse().unwrap()
    }

    #[test]
    fn test_to_note_request_strips_query() {
        let request =
            to_note_request(Method::GET, &uri("/notes/abc?x=1"), HeaderMap::new(), Ok(Bytes::new()));
        assert_eq!(request.path, "/notes/abc");
        assert!(request.body.is_none());
        assert!(request.body_error.is_none());
        assert!(request.path_id.is_none());
    }

    #[test]
    fn test_to_note_request_keeps_body() {
        let body = Bytes::from_static(br#"{"title":"A"}"#);
        let request = to_note_request(Method::POST, &uri("/notes"), HeaderMap::new(), Ok(body));
        assert_eq!(request.body.as_deref(), Some(r#"{"title":"A"}"#));
        assert!(request.body_error.is_none());
    }

    #[test]
    fn test_to_note_request_rejects_invalid_utf8() {
        let body = Bytes::from_static(b"{\"title\":\"A\xff\",\"content\":\"B\"}");
        let request = to_note_request(Method::POST, &uri("/notes"), HeaderMap::new(), Ok(body));
        assert!(request.body.is_none());
        assert_eq!(request.body_error, Some(BodyError::NotUtf8));
    }

    #[test]
    fn test_to_note_request_carries_read_failure() {
        let request = to_note_request(
            Method::POST,
            &uri("/notes"),
            HeaderMap::new(),
            Err(BodyError::TooLarge),
        );
        assert!(request.body.is_none());
        assert_eq!(request.body_error, Some(BodyError::TooLarge));
    }
}
