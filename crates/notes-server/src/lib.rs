//! notes-server: HTTP API server for device-scoped notes
//!
//! This crate provides:
//! - The identity extractor (`x-device-id` header, falling back to a
//!   `device_id` field in the JSON body)
//! - The request router: a fixed (method, path) table over five note
//!   operations, plus the OPTIONS preflight short-circuit
//! - The response formatter: status, fixed CORS headers, JSON or empty body
//! - An axum binding that feeds every HTTP request through the router
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{app, AppState, NoteRouter, ServerConfig};
//! use notes_store::{NoteStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     let store = NoteStore::open(&StoreConfig::from_env()?).await?;
//!     let app = app::build_app(AppState::new(NoteRouter::new(store), config));
//!     // serve `app` with axum::serve
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod identity;
pub mod middleware;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use request::NoteRequest;
pub use response::NoteResponse;
pub use router::NoteRouter;
pub use routes::Route;
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
