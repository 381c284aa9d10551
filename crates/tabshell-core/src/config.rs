//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tabshell_navigation::{DEFAULT_FALLBACK_URL, DEFAULT_SEARCH_TEMPLATE};
use tabshell_tabs::HOME_URL;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Search engine URL template
    pub search_engine: String,
    /// Page the engine is sent to when it tries to leave HTTP(S)
    pub fallback_url: String,
    /// URL new tabs open with
    pub homepage: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("tabshell.db"),
            search_engine: DEFAULT_SEARCH_TEMPLATE.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            homepage: HOME_URL.to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("TabShell"))
            .unwrap_or_else(|| PathBuf::from(".tabshell"))
    }

    /// Read a JSON config; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
