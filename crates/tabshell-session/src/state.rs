//! Session state snapshot
//!
//! Pure transitions over the tab strip. Persistence and publishing live in
//! the manager; everything here keeps the active-index invariant:
//!
//! ```text
//! tabs empty      => active_index == None, current_url == "Home"
//! tabs non-empty  => active_index == Some(i), i < tabs.len()
//! ```

use serde::{Deserialize, Serialize};

use tabshell_tabs::{TabId, TabRecord, HOME_URL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Display order of the tab strip
    pub tabs: Vec<TabRecord>,
    pub active_index: Option<usize>,
    /// URL shown for the active tab
    pub current_url: String,
}

impl SessionState {
    pub fn empty() -> Self {
        Self {
            tabs: Vec::new(),
            active_index: None,
            current_url: HOME_URL.to_string(),
        }
    }

    /// Adopt a loaded tab list with the first tab active
    pub fn from_tabs(tabs: Vec<TabRecord>) -> Self {
        let mut state = Self {
            tabs,
            active_index: None,
            current_url: HOME_URL.to_string(),
        };
        if !state.tabs.is_empty() {
            state.select(0);
        }
        state
    }

    /// Active index with `-1` for "no tabs"
    pub fn active_index_signed(&self) -> isize {
        self.active_index.map_or(-1, |i| i as isize)
    }

    pub fn active_tab(&self) -> Option<&TabRecord> {
        self.active_index.and_then(|i| self.tabs.get(i))
    }

    pub fn position_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub fn is_consistent(&self) -> bool {
        match self.active_index {
            None => self.tabs.is_empty(),
            Some(i) => i < self.tabs.len(),
        }
    }

    pub(crate) fn select(&mut self, index: usize) {
        debug_assert!(index < self.tabs.len());
        self.active_index = Some(index);
        self.current_url = self.tabs[index].url.clone();
    }

    pub(crate) fn push_active(&mut self, tab: TabRecord) {
        self.tabs.push(tab);
        self.select(self.tabs.len() - 1);
    }

    /// Remove the tab at `position`, keeping the selection on a live tab
    pub(crate) fn remove_at(&mut self, position: usize) -> TabRecord {
        let removed = self.tabs.remove(position);

        if self.tabs.is_empty() {
            self.active_index = None;
            self.current_url = HOME_URL.to_string();
            return removed;
        }

        if let Some(active) = self.active_index {
            if position < active {
                self.select(active - 1);
            } else if position == active {
                // The right-hand neighbour slides into place, or the new last tab
                self.select(active.min(self.tabs.len() - 1));
            }
        }

        removed
    }

    /// Set a tab's URL; `current_url` follows only for the active tab
    pub(crate) fn set_url(&mut self, index: usize, url: String) {
        if self.active_index == Some(index) {
            self.current_url = url.clone();
        }
        self.tabs[index].url = url;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: TabId, url: &str) -> TabRecord {
        TabRecord::new(format!("Tab {}", id), url).unwrap().with_id(id)
    }

    fn three_tabs() -> SessionState {
        SessionState::from_tabs(vec![
            tab(1, "https://a.com"),
            tab(2, "https://b.com"),
            tab(3, "https://c.com"),
        ])
    }

    #[test]
    fn test_empty_state() {
        let state = SessionState::empty();
        assert_eq!(state.active_index_signed(), -1);
        assert_eq!(state.current_url, HOME_URL);
        assert!(state.is_consistent());
        assert!(state.active_tab().is_none());
    }

    #[test]
    fn test_from_tabs_selects_first() {
        let state = three_tabs();
        assert_eq!(state.active_index, Some(0));
        assert_eq!(state.current_url, "https://a.com");
    }

    #[test]
    fn test_remove_before_active_shifts_left() {
        let mut state = three_tabs();
        state.select(2);
        state.remove_at(0);
        assert_eq!(state.active_index, Some(1));
        assert_eq!(state.current_url, "https://c.com");
    }

    #[test]
    fn test_remove_active_selects_neighbour() {
        let mut state = three_tabs();
        state.select(1);
        state.remove_at(1);
        assert_eq!(state.active_index, Some(1));
        assert_eq!(state.current_url, "https://c.com");

        // Removing the active last tab falls back to the new last tab
        state.remove_at(1);
        assert_eq!(state.active_index, Some(0));
        assert_eq!(state.current_url, "https://a.com");
    }

    #[test]
    fn test_remove_after_active_keeps_selection() {
        let mut state = three_tabs();
        state.remove_at(2);
        assert_eq!(state.active_index, Some(0));
        assert_eq!(state.current_url, "https://a.com");
    }

    #[test]
    fn test_remove_only_tab() {
        let mut state = SessionState::from_tabs(vec![tab(1, "https://a.com")]);
        let removed = state.remove_at(0);
        assert_eq!(removed.id, 1);
        assert!(state.tabs.is_empty());
        assert_eq!(state.active_index, None);
        assert_eq!(state.current_url, HOME_URL);
    }

    #[test]
    fn test_set_url_background_tab() {
        let mut state = three_tabs();
        state.set_url(2, "https://d.com".to_string());
        assert_eq!(state.tabs[2].url, "https://d.com");
        assert_eq!(state.current_url, "https://a.com");

        state.set_url(0, "https://e.com".to_string());
        assert_eq!(state.current_url, "https://e.com");
    }
}
