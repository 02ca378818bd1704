//! Device-scoped note operations.
//!
//! `NoteStore` wraps a [`NoteTable`] and applies the rules every caller must
//! go through:
//!
//! - Title and content are trimmed and must be non-empty on create and update.
//! - A note is readable and writable only with its owner's device id. A
//!   mismatch is reported exactly like a missing note.
//! - `created_at` is set once; `updated_at` strictly advances on update.
//!
//! DELETE does not verify ownership under the default [`DeletePolicy`].

use std::sync::Arc;

use notes_core::{DeviceId, Note, NoteId, Timestamp};

use crate::error::{StoreError, StoreResult};
use crate::store::StoreConfig;
use crate::table::NoteTable;

/// Whether DELETE checks that the caller owns the note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Remove the row by id regardless of owner.
    #[default]
    Unchecked,
    /// Apply the same ownership check as GET and PUT.
    OwnerOnly,
}

/// Device-scoped access to the notes table.
#[derive(Clone)]
pub struct NoteStore {
    table: Arc<dyn NoteTable>,
    delete_policy: DeletePolicy,
}

impl NoteStore {
    /// Create a store over the given table with the default delete policy.
    pub fn new(table: Arc<dyn NoteTable>) -> Self {
        Self {
            table,
            delete_policy: DeletePolicy::default(),
        }
    }

    /// Open the backend named by `config` and apply its delete policy.
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        let table = config.open_table().await?;
        Ok(Self::new(table).with_delete_policy(config.delete_policy))
    }

    /// Replace the delete policy.
    #[must_use]
    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    /// The active delete policy.
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Create a note owned by `device_id` and return its new id.
    pub async fn create(
        &self,
        device_id: &DeviceId,
        title: &str,
        content: &str,
    ) -> StoreResult<NoteId> {
        let (title, content) = validate_text(title, content)?;

        let note = Note::new(device_id.clone(), title, content);
        self.table.put_item(&note).await?;

        tracing::info!(
            note_id = %note.note_id,
            device_id = %device_id,
            "Note created"
        );

        Ok(note.note_id)
    }

    /// All notes owned by `device_id`, in no particular order.
    pub async fn list_by_owner(&self, device_id: &DeviceId) -> StoreResult<Vec<Note>> {
        let notes = self.table.query_by_device(device_id).await?;
        tracing::debug!(device_id = %device_id, count = notes.len(), "Listed notes");
        Ok(notes)
    }

    /// Fetch a note, failing with `NotFound` if it is absent or not owned by
    /// `device_id`.
    pub async fn get(&self, device_id: &DeviceId, note_id: &NoteId) -> StoreResult<Note> {
        match self.table.get_item(note_id).await? {
            Some(note) if note.is_owned_by(device_id) => Ok(note),
            Some(_) => {
                tracing::debug!(
                    note_id = %note_id,
                    device_id = %device_id,
                    "Note owned by another device"
                );
                Err(StoreError::NotFound(note_id.clone()))
            }
            None => Err(StoreError::NotFound(note_id.clone())),
        }
    }

    /// Overwrite title and content of an owned note and refresh `updated_at`.
    pub async fn update(
        &self,
        device_id: &DeviceId,
        note_id: &NoteId,
        title: &str,
        content: &str,
    ) -> StoreResult<()> {
        let existing = self.get(device_id, note_id).await?;
        let (title, content) = validate_text(title, content)?;

        let updated_at = Timestamp::now_after(existing.updated_at);
        self.table
            .update_item(note_id, title, content, updated_at)
            .await?;

        tracing::info!(note_id = %note_id, device_id = %device_id, "Note updated");
        Ok(())
    }

    /// Remove a note.
    ///
    /// With [`DeletePolicy::Unchecked`] any caller holding the id may delete
    /// it, and deleting an absent id succeeds.
    pub async fn delete(&self, device_id: &DeviceId, note_id: &NoteId) -> StoreResult<()> {
        match self.delete_policy {
            DeletePolicy::OwnerOnly => {
                self.get(device_id, note_id).await?;
            }
            DeletePolicy::Unchecked => match self.table.get_item(note_id).await {
                Ok(Some(note)) if !note.is_owned_by(device_id) => {
                    tracing::warn!(
                        note_id = %note_id,
                        owner = %note.device_id,
                        caller = %device_id,
                        "Deleting note owned by another device"
                    );
                }
                Ok(_) => {}
                // The owner lookup only feeds the log line; the delete goes ahead.
                Err(e) => {
                    tracing::debug!(
                        note_id = %note_id,
                        error = %e,
                        "Owner lookup before delete failed"
                    );
                }
            },
        }

        self.table.delete_item(note_id).await?;
        tracing::info!(note_id = %note_id, device_id = %device_id, "Note deleted");
        Ok(())
    }
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("delete_policy", &self.delete_policy)
            .finish_non_exhaustive()
    }
}

/// Trim title and content, rejecting either if blank.
fn validate_text<'a>(title: &'a str, content: &'a str) -> StoreResult<(&'a str, &'a str)> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(StoreError::InvalidInput(
            "Title and content are required".to_string(),
        ));
    }
    Ok((title, content))
}

// ============================================================================
// Tests
// ============================================================================
