//! Error types for the storage layer.

use notes_core::NoteId;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The note does not exist, or it belongs to another device.
    ///
    /// Callers cannot tell the two cases apart.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// Title or content missing or blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A note with this id is already stored.
    #[error("duplicate note: {0}")]
    DuplicateNote(NoteId),

    /// The backing store could not be reached or rejected the call.
    #[error("note store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A stored row could not be decoded into a note.
    #[error("invalid stored row for note {note_id}: {reason}")]
    InvalidRow { note_id: String, reason: String },

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
