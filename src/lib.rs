//! Core library surface for the Institute Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: an SQLite-backed persistence layer and the Ratatui front end that
//! drives it.
pub mod db;
pub mod models;
pub mod ui;

/// Convenience re-export for the persistence layer entry point used by
/// `main.rs` to bring up the embedded SQLite store.
pub use db::open_store;

/// The primary domain types that other layers manipulate.
pub use models::{Course, Person, PersonKind};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
