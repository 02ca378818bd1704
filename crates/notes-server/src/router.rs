//! Request router.
//!
//! Dispatch order:
//! 1. Resolve the route from method and path.
//! 2. OPTIONS answers immediately, without an identity.
//! 3. Every other request needs a device id, including unmatched routes.
//! 4. The route's operation runs against the injected [`NoteStore`].
//!
//! [`NoteRouter::handle`] never fails; errors become formatted responses.

use axum::http::StatusCode;
use notes_core::{DeviceId, NoteId};
use notes_store::NoteStore;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::identity::extract_device_id;
use crate::request::{BodyError, NoteRequest};
use crate::response::NoteResponse;
use crate::routes::Route;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST /notes and PUT /notes/{id}.
#[derive(Debug, Deserialize)]
pub struct NoteBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Response for POST /notes.
#[derive(Debug, Serialize)]
pub struct CreateNoteResponse {
    pub note_id: NoteId,
}

/// Response for PUT /notes/{id}.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse and trim a create/update body. An absent body reads as `{}`.
fn parse_note_body(body: Option<&str>) -> ApiResult<NoteBody> {
    let raw = body.unwrap_or("{}");
    let parsed: NoteBody = serde_json::from_str(raw)
        .map_err(|_| ApiError::InvalidInput("Invalid JSON body".to_string()))?;

    Ok(NoteBody {
        title: parsed.title.trim().to_string(),
        content: parsed.content.trim().to_string(),
    })
}

/// Parse the create/update body of a request, reporting a body the transport
/// could not decode.
fn note_body(request: &NoteRequest) -> ApiResult<NoteBody> {
    match request.body_error {
        Some(BodyError::NotUtf8) => Err(ApiError::InvalidInput("Invalid JSON body".to_string())),
        Some(BodyError::TooLarge) => Err(ApiError::InvalidInput(
            "Request body too large".to_string(),
        )),
        None => parse_note_body(request.body.as_deref()),
    }
}

/// Reject an empty note id before it reaches the store.
fn require_note_id(id: String) -> ApiResult<NoteId> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidInput("Missing note ID".to_string()));
    }
    Ok(NoteId::from(id))
}

// ============================================================================
// Router
// ============================================================================

/// Maps requests onto note operations.
#[derive(Debug, Clone)]
pub struct NoteRouter {
    store: NoteStore,
}

impl NoteRouter {
    /// Create a router over the given store.
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }

    /// Get a reference to the note store.
    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Handle one request.
    pub async fn handle(&self, request: NoteRequest) -> NoteResponse {
        let route = Route::resolve(&request.method, &request.path, request.path_id.as_deref());
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            ?route,
            "Dispatching request"
        );

        match self.dispatch(route, &request).await {
            Ok(response) => response,
            Err(error) => NoteResponse::from_error(&error),
        }
    }

    async fn dispatch(&self, route: Route, request: &NoteRequest) -> ApiResult<NoteResponse> {
        if route.is_anonymous() {
            return Ok(NoteResponse::empty(StatusCode::OK));
        }

        let device_id = extract_device_id(request)?;

        match route {
            Route::CreateNote => self.create_note(&device_id, request).await,
            Route::ListNotes => self.list_notes(&device_id).await,
            Route::GetNote(id) => self.get_note(&device_id, require_note_id(id)?).await,
            Route::UpdateNote(id) => {
                self.update_note(&device_id, require_note_id(id)?, request)
                    .await
            }
            Route::DeleteNote(id) => self.delete_note(&device_id, require_note_id(id)?).await,
            Route::Preflight | Route::Unmatched => Err(ApiError::NotFound),
        }
    }

    // ========================================================================
    // Route Handlers
    // ========================================================================

    /// POST /notes - Create a note.
    ///
    /// # Request
    ///
    /// Body: `{ "title": "...", "content": "..." }`
    ///
    /// # Response
    ///
    /// - 201 Created: `{ "note_id": "..." }`
    /// - 400 Bad Request: missing identity, blank field, or invalid JSON
    async fn create_note(
        &self,
        device_id: &DeviceId,
        request: &NoteRequest,
    ) -> ApiResult<NoteResponse> {
        let NoteBody { title, content } = note_body(request)?;
        let note_id = self.store.create(device_id, &title, &content).await?;

        Ok(NoteResponse::json(
            StatusCode::CREATED,
            &CreateNoteResponse { note_id },
        ))
    }

    /// GET /notes - List the caller's notes.
    async fn list_notes(&self, device_id: &DeviceId) -> ApiResult<NoteResponse> {
        let notes = self.store.list_by_owner(device_id).await?;
        Ok(NoteResponse::json(StatusCode::OK, &notes))
    }

    /// GET /notes/{id} - Read one note.
    ///
    /// A note owned by another device answers 404, same as a missing one.
    async fn get_note(&self, device_id: &DeviceId, note_id: NoteId) -> ApiResult<NoteResponse> {
        let note = self.store.get(device_id, &note_id).await?;
        Ok(NoteResponse::json(StatusCode::OK, &note))
    }

    /// PUT /notes/{id} - Replace title and content.
    ///
    /// # Response
    ///
    /// - 200 OK: `{ "message": "Updated" }`
    /// - 400 Bad Request: blank field or invalid JSON
    /// - 404 Not Found: missing note or owned by another device
    async fn update_note(
        &self,
        device_id: &DeviceId,
        note_id: NoteId,
        request: &NoteRequest,
    ) -> ApiResult<NoteResponse> {
        let NoteBody { title, content } = note_body(request)?;
        self.store
            .update(device_id, &note_id, &title, &content)
            .await?;

        Ok(NoteResponse::json(
            StatusCode::OK,
            &MessageResponse {
                message: "Updated".to_string(),
            },
        ))
    }

    /// DELETE /notes/{id} - Remove a note.
    ///
    /// Ownership is only checked when the store's delete policy requires it.
    async fn delete_note(&self, device_id: &DeviceId, note_id: NoteId) -> ApiResult<NoteResponse> {
        self.store.delete(device_id, &note_id).await?;
        Ok(NoteResponse::empty(StatusCode::NO_CONTENT))
    }
}

// ============================================================================
// Tests
// ============================================================================
