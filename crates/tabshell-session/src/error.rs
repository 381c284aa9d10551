//! Session error types

use thiserror::Error;

use tabshell_tabs::TabId;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Tab error: {0}")]
    Tab(#[from] tabshell_tabs::TabError),

    #[error("Tab index {index} out of range ({len} tabs)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),
}
