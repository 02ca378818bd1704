//! Schema definitions and migration utilities.
//!
//! The table name comes from configuration, so the embedded migration is a
//! template rendered against a validated [`TableName`].

use std::fmt;

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL template for the notes table (001_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/001_notes.sql");

/// PostgreSQL truncates identifiers longer than this.
const MAX_IDENTIFIER_LEN: usize = 63;

/// A table name that is safe to interpolate into SQL.
///
/// Must match `[A-Za-z_][A-Za-z0-9_]*` and fit in a PostgreSQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Validate a configured table name.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let name = raw.trim();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

        if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
            return Err(StoreError::ConfigError(format!(
                "invalid table name {:?}: expected letters, digits and underscores, \
                 starting with a letter or underscore, at most {} characters",
                raw, MAX_IDENTIFIER_LEN
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the notes migration for `table`.
pub fn notes_migration(table: &TableName) -> String {
    NOTES_MIGRATION.replace("{table}", table.as_str())
}

/// Create the notes table and its device index if they do not exist.
///
/// This function is idempotent - it can be run multiple times safely.
pub async fn run_migrations(pool: &PgPool, table: &TableName) -> StoreResult<()> {
    tracing::info!(table = %table, "Running database migrations...");

    sqlx::raw_sql(&notes_migration(table))
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notes migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the notes table exists.
pub async fn is_schema_initialized(pool: &PgPool, table: &TableName) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema()
            AND table_name = lower($1)
        )
        "#,
    )
    .bind(table.as_str())
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_migration_embedded() {
        assert!(NOTES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS {table}"));
        assert!(NOTES_MIGRATION.contains("CREATE INDEX IF NOT EXISTS {table}_device_id_idx"));
    }

    #[test]
    fn test_notes_migration_rendered() {
        let table = TableName::parse("device_notes").unwrap();
        let sql = notes_migration(&table);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS device_notes ("));
        assert!(sql.contains("ON device_notes (device_id)"));
        assert!(!sql.contains("{table}"));
    }

    #[test]
    fn test_table_name_valid() {
        assert_eq!(TableName::parse("notes").unwrap().as_str(), "notes");
        assert_eq!(TableName::parse(" _notes_v2 ").unwrap().as_str(), "_notes_v2");
    }

    #[test]
    fn test_table_name_rejects_injection() {
        assert!(TableName::parse("notes; DROP TABLE users").is_err());
        assert!(TableName::parse("notes\"").is_err());
        assert!(TableName::parse("public.notes").is_err());
    }

    #[test]
    fn test_table_name_rejects_empty_and_leading_digit() {
        assert!(TableName::parse("").is_err());
        assert!(TableName::parse("   ").is_err());
        assert!(TableName::parse("1notes").is_err());
    }

    #[test]
    fn test_table_name_rejects_too_long() {
        assert!(TableName::parse(&"n".repeat(63)).is_ok());
        assert!(TableName::parse(&"n".repeat(64)).is_err());
    }
}
