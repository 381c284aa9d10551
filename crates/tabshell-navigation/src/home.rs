//! Home page shortcut grid

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeShortcut {
    pub name: String,
    pub url: String,
}

impl HomeShortcut {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Sites shown on a fresh home page, in display order
pub fn default_shortcuts() -> Vec<HomeShortcut> {
    [
        ("Google", "https://www.google.com"),
        ("YouTube", "https://www.youtube.com"),
        ("Facebook", "https://www.facebook.com"),
        ("Github", "https://www.github.com"),
        ("Instagram", "https://www.instagram.com"),
        ("LinkedIn", "https://www.linkedin.com"),
        ("Reddit", "https://www.reddit.com"),
        ("Wikipedia", "https://www.wikipedia.org"),
        ("Amazon", "https://www.amazon.com"),
    ]
    .iter()
    .map(|(name, url)| HomeShortcut::new(name, url))
    .collect()
}
