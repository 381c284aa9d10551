//! Main browser state container
//!
//! The UI forwards tab strip, search bar, home page and options sheet events
//! here and renders the [`SessionState`] snapshots it gets back.

use std::sync::Arc;

use tokio::sync::watch;

use tabshell_navigation::{default_shortcuts, is_acceptable, HomeShortcut, UrlFilter};
use tabshell_session::{SessionManager, SessionState, WebEngine};
use tabshell_storage::Database;
use tabshell_tabs::{SqliteTabRepository, TabId, TabRecord, HOME_URL};

use crate::config::Config;
use crate::error::CoreError;
use crate::menu::{MenuOption, MenuOutcome};
use crate::Result;

const SEARCH_ENGINE_SETTING: &str = "search_engine";

/// Main browser instance, generic over the embedded web engine type
pub struct Browser<E> {
    config: Config,
    db: Database,
    session_manager: SessionManager<E>,
    shortcuts: Vec<HomeShortcut>,
}

impl<E> Browser<E> {
    /// Open the database at the configured path
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        if config.homepage != HOME_URL && !is_acceptable(&config.homepage) {
            return Err(CoreError::Config(format!(
                "homepage must be \"{}\" or an http(s) URL, got {}",
                HOME_URL, config.homepage
            )));
        }

        let mut filter = UrlFilter::with_search_engine(config.search_engine.clone())?;
        filter.set_fallback_url(config.fallback_url.clone())?;

        let repository = Arc::new(SqliteTabRepository::new(db.clone()));
        let session_manager = SessionManager::new(repository, filter);

        Ok(Self {
            config,
            db,
            session_manager,
            shortcuts: default_shortcuts(),
        })
    }

    /// Restore the tab strip and saved preferences
    pub fn initialize(&self) -> Result<SessionState> {
        if let Some(template) = self.db.get_setting(SEARCH_ENGINE_SETTING)? {
            let mut filter = self.session_manager.url_filter();
            match filter.set_search_engine(template) {
                Ok(()) => self.session_manager.set_url_filter(filter),
                Err(e) => tracing::warn!(error = %e, "Ignoring saved search engine"),
            }
        }

        let state = self.session_manager.initialize()?;

        tracing::info!("Browser initialized");

        Ok(state)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session_manager(&self) -> &SessionManager<E> {
        &self.session_manager
    }

    pub fn state(&self) -> SessionState {
        self.session_manager.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session_manager.subscribe()
    }

    pub fn home_shortcuts(&self) -> &[HomeShortcut] {
        &self.shortcuts
    }

    // === Tab strip ===

    /// The "+" button: a numbered tab on the configured homepage
    pub fn open_new_tab(&self) -> Result<TabRecord> {
        let name = format!("Tab {}", self.session_manager.tab_count() + 1);
        Ok(self
            .session_manager
            .add_tab(name, self.config.homepage.clone())?)
    }

    pub fn select_tab(&self, index: usize) -> Result<()> {
        Ok(self.session_manager.select_tab(index)?)
    }

    pub fn close_tab(&self, tab_id: TabId) -> Result<()> {
        Ok(self.session_manager.remove_tab_by_id(tab_id)?)
    }

    /// Close the active tab; false when there was none
    pub fn close_active_tab(&self) -> Result<bool> {
        match self.session_manager.active_tab() {
            Some(tab) => {
                self.session_manager.remove_tab(&tab)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // === Settings ===

    pub fn search_engine(&self) -> String {
        self.session_manager.url_filter().search_template().to_string()
    }

    /// Validate, persist and apply a search engine template
    pub fn set_search_engine(&self, template: String) -> Result<()> {
        let mut filter = self.session_manager.url_filter();
        filter.set_search_engine(template.clone())?;

        self.db.set_setting(SEARCH_ENGINE_SETTING, &template)?;
        self.session_manager.set_url_filter(filter);

        tracing::info!(template = %template, "Search engine changed");

        Ok(())
    }
}

impl<E: WebEngine> Browser<E> {
    /// Search bar submit: load the input in the active tab, opening a tab
    /// first when the strip is empty
    pub fn submit_search(&self, input: &str) -> Result<String> {
        let index = match self.session_manager.snapshot().active_index {
            Some(index) => index,
            None => {
                self.open_new_tab()?;
                self.session_manager.tab_count() - 1
            }
        };

        Ok(self.session_manager.navigate(index, input)?)
    }

    pub fn open_shortcut(&self, shortcut: &HomeShortcut) -> Result<String> {
        self.submit_search(&shortcut.url)
    }

    /// Show the home page in the active tab
    pub fn go_home(&self) -> Result<()> {
        if let Some(index) = self.session_manager.snapshot().active_index {
            self.session_manager.navigate(index, HOME_URL)?;
        }
        Ok(())
    }

    pub fn apply_menu_option(&self, option: MenuOption) -> Result<MenuOutcome> {
        if let Some(route) = option.route() {
            return Ok(MenuOutcome::Open(route));
        }

        let outcome = match option {
            MenuOption::Close => {
                if self.close_active_tab()? {
                    MenuOutcome::TabClosed
                } else {
                    MenuOutcome::Ignored
                }
            }
            MenuOption::Home => {
                self.go_home()?;
                MenuOutcome::WentHome
            }
            MenuOption::Share => {
                let url = self.session_manager.snapshot().current_url;
                if is_acceptable(&url) {
                    MenuOutcome::Share(url)
                } else {
                    MenuOutcome::Ignored
                }
            }
            MenuOption::Exit => MenuOutcome::Exit,
            other => MenuOutcome::Toggle(other),
        };

        tracing::debug!(option = %option, outcome = ?outcome, "Applied menu option");

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Route;
    use std::path::PathBuf;

    struct NullEngine;

    impl WebEngine for NullEngine {
        fn current_url(&self) -> Option<String> {
            None
        }

        fn load(&mut self, _url: &str) {}

        fn reload(&mut self) {}
    }

    fn browser() -> Browser<NullEngine> {
        let config = Config::new(PathBuf::from("/unused"));
        let db = Database::open_in_memory().unwrap();
        let browser = Browser::with_database(config, db).unwrap();
        browser.initialize().unwrap();
        browser
    }

    #[test]
    fn test_new_tab_numbering() {
        let browser = browser();
        let tab = browser.open_new_tab().unwrap();
        assert_eq!(tab.name, "Tab 2");
        assert_eq!(tab.url, HOME_URL);

        let state = browser.state();
        assert_eq!(state.active_index, Some(1));
        assert_eq!(state.current_url, HOME_URL);
    }

    #[test]
    fn test_submit_search_uses_active_tab() {
        let browser = browser();
        browser.open_new_tab().unwrap();
        browser.select_tab(0).unwrap();

        let url = browser.submit_search("weather today").unwrap();
        assert_eq!(url, "https://www.google.com/search?q=weather+today");

        let state = browser.state();
        assert_eq!(state.tabs[0].url, url);
        assert_eq!(state.tabs[1].url, HOME_URL);
    }

    #[test]
    fn test_submit_search_with_no_tabs_opens_one() {
        let browser = browser();
        assert!(browser.close_active_tab().unwrap());
        assert!(!browser.close_active_tab().unwrap());

        browser.submit_search("example.com").unwrap();
        let state = browser.state();
        assert_eq!(state.tabs.len(), 1);
        assert_eq!(state.current_url, "https://example.com");
    }

    #[test]
    fn test_open_shortcut_and_go_home() {
        let browser = browser();
        let shortcut = browser.home_shortcuts()[0].clone();

        assert_eq!(browser.open_shortcut(&shortcut).unwrap(), shortcut.url);
        browser.go_home().unwrap();
        assert_eq!(browser.state().current_url, HOME_URL);
    }

    #[test]
    fn test_search_engine_persists_across_restart() {
        let db = Database::open_in_memory().unwrap();
        let config = Config::new(PathBuf::from("/unused"));

        let first: Browser<NullEngine> =
            Browser::with_database(config.clone(), db.clone()).unwrap();
        first.initialize().unwrap();
        first
            .set_search_engine("https://duckduckgo.com/?q=%s".to_string())
            .unwrap();
        assert!(first
            .set_search_engine("https://example.com".to_string())
            .is_err());

        let second: Browser<NullEngine> = Browser::with_database(config, db).unwrap();
        second.initialize().unwrap();
        assert_eq!(second.search_engine(), "https://duckduckgo.com/?q=%s");
        assert_eq!(
            second.submit_search("rust lang").unwrap(),
            "https://duckduckgo.com/?q=rust+lang"
        );
    }

    #[test]
    fn test_invalid_saved_search_engine_ignored() {
        let db = Database::open_in_memory().unwrap();
        db.set_setting(SEARCH_ENGINE_SETTING, "https://example.com/no-placeholder")
            .unwrap();

        let mut config = Config::new(PathBuf::from("/unused"));
        config.search_engine = "https://www.bing.com/search?q=%s".to_string();

        let browser: Browser<NullEngine> = Browser::with_database(config, db).unwrap();
        browser.initialize().unwrap();

        assert_eq!(browser.search_engine(), "https://www.bing.com/search?q=%s");
        assert_eq!(
            browser.submit_search("weather").unwrap(),
            "https://www.bing.com/search?q=weather"
        );
    }

    #[test]
    fn test_menu_options() {
        let browser = browser();
        browser.open_new_tab().unwrap();

        assert_eq!(
            browser.apply_menu_option(MenuOption::Settings).unwrap(),
            MenuOutcome::Open(Route::Settings)
        );
        assert_eq!(
            browser.apply_menu_option(MenuOption::Share).unwrap(),
            MenuOutcome::Ignored
        );

        browser.submit_search("example.com").unwrap();
        assert_eq!(
            browser.apply_menu_option(MenuOption::Share).unwrap(),
            MenuOutcome::Share("https://example.com".to_string())
        );
        assert_eq!(
            browser.apply_menu_option(MenuOption::Home).unwrap(),
            MenuOutcome::WentHome
        );
        assert_eq!(
            browser.apply_menu_option(MenuOption::Close).unwrap(),
            MenuOutcome::TabClosed
        );
        assert_eq!(browser.state().tabs.len(), 1);
        assert_eq!(
            browser.apply_menu_option(MenuOption::DarkMode).unwrap(),
            MenuOutcome::Toggle(MenuOption::DarkMode)
        );
        assert_eq!(
            browser.apply_menu_option(MenuOption::Exit).unwrap(),
            MenuOutcome::Exit
        );
    }

    #[test]
    fn test_invalid_homepage_rejected() {
        let mut config = Config::new(PathBuf::from("/unused"));
        config.homepage = "about:blank".to_string();
        let result: Result<Browser<NullEngine>> =
            Browser::with_database(config, Database::open_in_memory().unwrap());
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_file_backed_browser_restores_tabs() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("data"));

        {
            let browser: Browser<NullEngine> = Browser::new(config.clone()).unwrap();
            browser.initialize().unwrap();
            browser.open_new_tab().unwrap();
            browser.submit_search("example.com").unwrap();
        }

        let browser: Browser<NullEngine> = Browser::new(config).unwrap();
        let state = browser.initialize().unwrap();
        assert_eq!(state.tabs.len(), 2);
        assert_eq!(state.tabs[1].url, "https://example.com");
        assert_eq!(state.active_index, Some(0));
    }
}
