//! The normalized request handed to the router.
//!
//! The HTTP binding (or any other transport) fills this in; the router never
//! sees transport-specific types.

use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Why the transport could not hand over a text body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyError {
    /// The bytes were not valid UTF-8.
    NotUtf8,
    /// Reading stopped, normally at the length limit.
    TooLarge,
}

/// A transport-independent request.
#[derive(Debug, Clone)]
pub struct NoteRequest {
    pub method: Method,
    /// Request path without query string, e.g. `/notes/abc`.
    pub path: String,
    /// Note id already extracted by the transport, if it does that.
    /// Takes precedence over the trailing path segment.
    pub path_id: Option<String>,
    /// Header names are case-insensitive.
    pub headers: HeaderMap,
    pub body: Option<String>,
    /// Set when a body was sent but could not be decoded; `body` is then `None`.
    pub body_error: Option<BodyError>,
}

impl NoteRequest {
    /// A request with no headers, no body and no pre-extracted id.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_id: None,
            headers: HeaderMap::new(),
            body: None,
            body_error: None,
        }
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.body_error = None;
        self
    }

    /// Mark the body as undecodable.
    #[must_use]
    pub fn with_body_error(mut self, error: BodyError) -> Self {
        self.body = None;
        self.body_error = Some(error);
        self
    }

    /// Set the pre-extracted note id.
    #[must_use]
    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.path_id = Some(id.into());
        self
    }
}
