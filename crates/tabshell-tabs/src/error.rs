//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Storage error: {0}")]
    Storage(#[from] tabshell_storage::StorageError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Icon codec error: {0}")]
    IconCodec(#[from] image::ImageError),

    #[error("Invalid icon: {0}")]
    InvalidIcon(String),
}
