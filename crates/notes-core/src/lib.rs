//! notes-core: Core types for the device-scoped notes service
//!
//! This crate provides:
//! - `NoteId` and `DeviceId` identifier newtypes
//! - `Timestamp`, the naive-UTC ISO-8601 time stamp stored with every note
//! - `Note`, the single persisted record
//!
//! Nothing here touches storage or HTTP; both the store and the server
//! depend on these types.

pub mod types;

pub use types::{DeviceId, Note, NoteId, Timestamp, TimestampParseError};
