//! Tab record
//!
//! What the tab strip shows for every open tab:
//! - Icon
//! - Name
//! - URL, or the home page

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::icon::TabIcon;
use crate::Result;

/// Store-generated identifier; `0` means "not persisted yet"
pub type TabId = i64;

/// Sentinel URL meaning "show the home page"
pub const HOME_URL: &str = "Home";

/// Name of the tab synthesized when no tabs were persisted
pub const HOME_NAME: &str = "Home";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRecord {
    pub id: TabId,
    pub name: String,
    /// Navigable URL or [`HOME_URL`]
    pub url: String,
    pub icon: TabIcon,
}

impl TabRecord {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        Ok(Self {
            id: 0,
            name: name.into(),
            url,
            icon: TabIcon::placeholder(),
        })
    }

    /// The default tab of a fresh install
    pub fn home() -> Self {
        Self {
            id: 0,
            name: HOME_NAME.to_string(),
            url: HOME_URL.to_string(),
            icon: TabIcon::placeholder(),
        }
    }

    pub fn with_id(mut self, id: TabId) -> Self {
        self.id = id;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn is_home(&self) -> bool {
        self.url == HOME_URL
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.name.is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}
