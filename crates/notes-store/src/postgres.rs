//! PostgreSQL note table.
//!
//! All statements are rendered once at construction against the validated
//! table name and reused for every call.

use async_trait::async_trait;
use notes_core::{DeviceId, Note, NoteId, Timestamp};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::{StoreError, StoreResult};
use crate::models::NoteRow;
use crate::schema::{self, TableName};
use crate::store::StoreConfig;
use crate::table::NoteTable;

const COLUMNS: &str = "note_id, device_id, title, content, created_at, updated_at";

/// SQL text for each table operation.
#[derive(Debug, Clone)]
struct Statements {
    insert: String,
    select_by_id: String,
    update: String,
    delete: String,
    select_by_device: String,
}

impl Statements {
    fn new(table: &TableName) -> Self {
        Self {
            insert: format!(
                "INSERT INTO {table} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
            ),
            select_by_id: format!("SELECT {COLUMNS} FROM {table} WHERE note_id = $1"),
            update: format!(
                "UPDATE {table} SET title = $2, content = $3, updated_at = $4 WHERE note_id = $1"
            ),
            delete: format!("DELETE FROM {table} WHERE note_id = $1"),
            select_by_device: format!("SELECT {COLUMNS} FROM {table} WHERE device_id = $1"),
        }
    }
}

/// A [`NoteTable`] stored in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgNoteTable {
    pool: PgPool,
    table: TableName,
    sql: Statements,
}

impl PgNoteTable {
    /// Connect to the database with the given configuration.
    ///
    /// Optionally runs migrations if `config.run_migrations` is true.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let database_url = config.database_url.as_deref().ok_or_else(|| {
            StoreError::ConfigError("DATABASE_URL is required for the postgres backend".into())
        })?;

        tracing::info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(database_url)
            .await?;

        tracing::info!(table = %config.table, "Connected to database");

        if config.run_migrations {
            schema::run_migrations(&pool, &config.table).await?;
        } else if !schema::is_schema_initialized(&pool, &config.table).await? {
            tracing::warn!(
                table = %config.table,
                "Notes table does not exist and migrations are disabled"
            );
        }

        Ok(Self::from_pool(pool, config.table.clone()))
    }

    /// Create a table handle from an existing connection pool.
    pub fn from_pool(pool: PgPool, table: TableName) -> Self {
        let sql = Statements::new(&table);
        Self { pool, table, sql }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The table this handle reads and writes.
    pub fn table(&self) -> &TableName {
        &self.table
    }
}

/// Map a unique-violation on insert to [`StoreError::DuplicateNote`].
fn map_insert_error(note_id: &NoteId, error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateNote(note_id.clone())
        }
        _ => StoreError::Unavailable(error),
    }
}

#[async_trait]
impl NoteTable for PgNoteTable {
    async fn put_item(&self, note: &Note) -> StoreResult<()> {
        let row = NoteRow::from(note);
        sqlx::query(&self.sql.insert)
            .bind(&row.note_id)
            .bind(&row.device_id)
            .bind(&row.title)
            .bind(&row.content)
            .bind(&row.created_at)
            .bind(&row.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(&note.note_id, e))?;
        Ok(())
    }

    async fn get_item(&self, note_id: &NoteId) -> StoreResult<Option<Note>> {
        sqlx::query_as::<_, NoteRow>(&self.sql.select_by_id)
            .bind(note_id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .map(NoteRow::into_note)
            .transpose()
    }

    async fn update_item(
        &self,
        note_id: &NoteId,
        title: &str,
        content: &str,
        updated_at: Timestamp,
    ) -> StoreResult<()> {
        let result = sqlx::query(&self.sql.update)
            .bind(note_id.as_str())
            .bind(title)
            .bind(content)
            .bind(updated_at.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(note_id.clone()));
        }
        Ok(())
    }

    async fn delete_item(&self, note_id: &NoteId) -> StoreResult<()> {
        sqlx::query(&self.sql.delete)
            .bind(note_id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn query_by_device(&self, device_id: &DeviceId) -> StoreResult<Vec<Note>> {
        sqlx::query_as::<_, NoteRow>(&self.sql.select_by_device)
            .bind(device_id.as_str())
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(NoteRow::into_note)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_use_table_name() {
        let sql = Statements::new(&TableName::parse("device_notes").unwrap());
        assert!(sql.insert.starts_with("INSERT INTO device_notes ("));
        assert!(sql.select_by_id.ends_with("FROM device_notes WHERE note_id = $1"));
        assert!(sql.update.contains("SET title = $2, content = $3, updated_at = $4"));
        assert_eq!(sql.delete, "DELETE FROM device_notes WHERE note_id = $1");
        assert!(sql.select_by_device.ends_with("WHERE device_id = $1"));
    }

    #[cfg(feature = "integration-tests")]
    mod integration {
        use super::*;
        use crate::repository::NoteStore;
        use std::sync::Arc;

        async fn connect() -> PgNoteTable {
            let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
            let mut config = StoreConfig::memory(TableName::parse("notes_it").unwrap());
            config.backend = crate::store::StoreBackend::Postgres;
            config.database_url = Some(url);
            config.run_migrations = true;
            PgNoteTable::connect(&config).await.unwrap()
        }

        #[tokio::test]
        async fn test_postgres_round_trip() {
            let store = NoteStore::new(Arc::new(connect().await));
            let device = DeviceId::parse("it-device").unwrap();

            let id = store.create(&device, "Title", "Body").await.unwrap();
            let note = store.get(&device, &id).await.unwrap();
            assert_eq!(note.title, "Title");
            assert_eq!(note.created_at, note.updated_at);

            store.update(&device, &id, "New", "Text").await.unwrap();
            let updated = store.get(&device, &id).await.unwrap();
            assert_eq!(updated.content, "Text");
            assert!(updated.updated_at > updated.created_at);

            let listed = store.list_by_owner(&device).await.unwrap();
            assert!(listed.iter().any(|n| n.note_id == id));

            store.delete(&device, &id).await.unwrap();
            assert!(matches!(
                store.get(&device, &id).await,
                Err(StoreError::NotFound(_))
            ));
        }
    }
}
