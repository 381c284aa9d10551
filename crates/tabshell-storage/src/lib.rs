//! TabShell Storage Layer
//!
//! SQLite-based persistence for the tab strip and user settings.
//! The schema is owned entirely by this crate; callers only see rows.

mod database;
mod error;
mod migrations;
mod tabs;

pub use database::Database;
pub use error::StorageError;
pub use tabs::{TabRow, TabStore};

pub type Result<T> = std::result::Result<T, StorageError>;
