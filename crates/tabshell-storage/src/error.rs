//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("No tab row with id {0}")]
    RowNotFound(i64),

    #[error("Unsupported schema version {found} (newest known is {supported})")]
    UnsupportedSchema { found: i32, supported: i32 },
}
