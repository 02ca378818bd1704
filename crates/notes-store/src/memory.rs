//! In-memory note table.
//!
//! Backs the `memory` store backend and every test that needs a store
//! without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use notes_core::{DeviceId, Note, NoteId, Timestamp};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::table::NoteTable;

/// A [`NoteTable`] held in a `HashMap` behind an async `RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryNoteTable {
    rows: RwLock<HashMap<NoteId, Note>>,
}

impl InMemoryNoteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the table holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl NoteTable for InMemoryNoteTable {
    async fn put_item(&self, note: &Note) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&note.note_id) {
            return Err(StoreError::DuplicateNote(note.note_id.clone()));
        }
        rows.insert(note.note_id.clone(), note.clone());
        Ok(())
    }

    async fn get_item(&self, note_id: &NoteId) -> StoreResult<Option<Note>> {
        Ok(self.rows.read().await.get(note_id).cloned())
    }

    async fn update_item(
        &self,
        note_id: &NoteId,
        title: &str,
        content: &str,
        updated_at: Timestamp,
    ) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        let row = rows
            .get_mut(note_id)
            .ok_or_else(|| StoreError::NotFound(note_id.clone()))?;
        row.title = title.to_string();
        row.content = content.to_string();
        row.updated_at = updated_at;
        Ok(())
    }

    async fn delete_item(&self, note_id: &NoteId) -> StoreResult<()> {
        self.rows.write().await.remove(note_id);
        Ok(())
    }

    async fn query_by_device(&self, device_id: &DeviceId) -> StoreResult<Vec<Note>> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|note| note.is_owned_by(device_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str) -> DeviceId {
        DeviceId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn put_then_get() {
        let table = InMemoryNoteTable::new();
        let note = Note::new(device("d1"), "A", "B");
        table.put_item(&note).await.unwrap();

        let fetched = table.get_item(&note.note_id).await.unwrap();
        assert_eq!(fetched, Some(note));
        assert_eq!(table.len().await, 1);
    }

    #[tokio::test]
    async fn put_duplicate_rejected() {
        let table = InMemoryNoteTable::new();
        let note = Note::new(device("d1"), "A", "B");
        table.put_item(&note).await.unwrap();

        let result = table.put_item(&note).await;
        assert!(matches!(result, Err(StoreError::DuplicateNote(_))));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let table = InMemoryNoteTable::new();
        let fetched = table.get_item(&NoteId::from("nope")).await.unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let table = InMemoryNoteTable::new();
        let result = table
            .update_item(&NoteId::from("nope"), "A", "B", Timestamp::now())
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let table = InMemoryNoteTable::new();
        let note = Note::new(device("d1"), "A", "B");
        table.put_item(&note).await.unwrap();

        table.delete_item(&note.note_id).await.unwrap();
        table.delete_item(&note.note_id).await.unwrap();
        assert!(table.is_empty().await);
    }

    #[tokio::test]
    async fn query_filters_by_device() {
        let table = InMemoryNoteTable::new();
        table.put_item(&Note::new(device("d1"), "one", "x")).await.unwrap();
        table.put_item(&Note::new(device("d1"), "two", "x")).await.unwrap();
        table.put_item(&Note::new(device("d2"), "three", "x")).await.unwrap();

        let mine = table.query_by_device(&device("d1")).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|n| n.device_id.as_str() == "d1"));

        let none = table.query_by_device(&device("d3")).await.unwrap();
        assert!(none.is_empty());
    }
}
