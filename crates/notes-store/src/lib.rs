//! notes-store: Storage layer for the device-scoped notes service
//!
//! This crate provides:
//! - [`NoteStore`]: create, list, get, update and delete, each scoped to the
//!   calling device
//! - [`NoteTable`]: the backend seam standing in for the external key-value
//!   and index service
//! - PostgreSQL ([`PgNoteTable`]) and in-memory ([`InMemoryNoteTable`]) backends
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{NoteStore, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = NoteStore::open(&config).await?;
//!
//! let id = store.create(&device_id, "Groceries", "milk, eggs").await?;
//! let note = store.get(&device_id, &id).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod store;
pub mod table;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryNoteTable;
pub use postgres::PgNoteTable;
pub use repository::{DeletePolicy, NoteStore};
pub use schema::TableName;
pub use store::{StoreBackend, StoreConfig};
pub use table::NoteTable;

// Re-export notes-core for downstream crates
pub use notes_core;
