//! Database models for the storage layer.
//!
//! These types map directly to table rows. Timestamps are kept as text in the
//! row type and parsed into [`Timestamp`] on the way out.

use notes_core::{DeviceId, Note, NoteId, Timestamp};
use sqlx::FromRow;

use crate::error::{StoreError, StoreResult};

/// Database row for the notes table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub note_id: String,
    pub device_id: String,
    pub title: String,
    pub content: String,
    /// ISO-8601 naive UTC
    pub created_at: String,
    /// ISO-8601 naive UTC
    pub updated_at: String,
}

impl NoteRow {
    /// Decode the row into a domain [`Note`].
    pub fn into_note(self) -> StoreResult<Note> {
        let invalid = |reason: String| StoreError::InvalidRow {
            note_id: self.note_id.clone(),
            reason,
        };

        let device_id = DeviceId::parse(&self.device_id)
            .ok_or_else(|| invalid("empty device_id".to_string()))?;
        let created_at: Timestamp = self
            .created_at
            .parse()
            .map_err(|e| invalid(format!("created_at: {}", e)))?;
        let updated_at: Timestamp = self
            .updated_at
            .parse()
            .map_err(|e| invalid(format!("updated_at: {}", e)))?;

        Ok(Note {
            note_id: NoteId::from(self.note_id),
            device_id,
            title: self.title,
            content: self.content,
            created_at,
            updated_at,
        })
    }
}

impl From<&Note> for NoteRow {
    fn from(note: &Note) -> Self {
        Self {
            note_id: note.note_id.to_string(),
            device_id: note.device_id.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at.to_string(),
            updated_at: note.updated_at.to_string(),
        }
    }
}
