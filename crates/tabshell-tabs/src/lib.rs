//! TabShell Tab Records
//!
//! A tab is a name, a URL (or the `"Home"` sentinel) and a thumbnail icon.
//! The [`TabRepository`] trait is the only way the session layer touches
//! persisted tabs.

mod error;
mod icon;
mod repository;
mod tab;

pub use error::TabError;
pub use icon::TabIcon;
pub use repository::{SqliteTabRepository, TabRepository};
pub use tab::{TabId, TabRecord, HOME_NAME, HOME_URL};

pub type Result<T> = std::result::Result<T, TabError>;
