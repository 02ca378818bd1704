//! The backend seam: a single table keyed by note id with a secondary lookup
//! by owning device.
//!
//! Implementations are plain data access. Ownership checks, validation and
//! timestamp handling live in [`crate::NoteStore`].

use async_trait::async_trait;
use notes_core::{DeviceId, Note, NoteId, Timestamp};

use crate::error::StoreResult;

/// Key-value table of notes with an index on `device_id`.
///
/// Each call is a single-row operation relying on the backend's own
/// atomicity; there are no multi-row transactions.
#[async_trait]
pub trait NoteTable: Send + Sync {
    /// Writes a new row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::DuplicateNote`] if the id is already present.
    async fn put_item(&self, note: &Note) -> StoreResult<()>;

    /// Reads a row by primary key.
    async fn get_item(&self, note_id: &NoteId) -> StoreResult<Option<Note>>;

    /// Overwrites title, content and `updated_at` of an existing row.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NotFound`] if no row has this id.
    async fn update_item(
        &self,
        note_id: &NoteId,
        title: &str,
        content: &str,
        updated_at: Timestamp,
    ) -> StoreResult<()>;

    /// Removes a row by primary key. Removing an absent row is not an error.
    async fn delete_item(&self, note_id: &NoteId) -> StoreResult<()>;

    /// All rows owned by `device_id`, in whatever order the index yields.
    async fn query_by_device(&self, device_id: &DeviceId) -> StoreResult<Vec<Note>>;
}
