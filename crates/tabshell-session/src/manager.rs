//! Session Manager
//!
//! Owns the tab strip, the active tab and the per-tab engine handles.
//! Writes go to the repository first; in-memory state only changes once the
//! write has returned, so a successful call means the change is durable and
//! a failed call leaves the session exactly as it was.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

use tabshell_navigation::{is_acceptable, NavigationDecision, UrlFilter};
use tabshell_tabs::{TabId, TabRecord, TabRepository};

use crate::engine::{EngineHandle, EngineHandles, WebEngine};
use crate::error::SessionError;
use crate::state::SessionState;
use crate::Result;

/// Lock order is always `state` before `engines`. Closures handed to the
/// engine-handle accessors, and [`WebEngine`] implementations, must not call
/// back into the manager.
pub struct SessionManager<E> {
    state: Arc<RwLock<SessionState>>,
    engines: Arc<RwLock<EngineHandles<E>>>,
    repository: Arc<dyn TabRepository>,
    filter: Arc<RwLock<UrlFilter>>,
    publisher: Arc<watch::Sender<SessionState>>,
}

/// Log a failed repository call and lift it into a session error
fn persisted<T>(result: tabshell_tabs::Result<T>, action: &str) -> Result<T> {
    result.map_err(|e| {
        tracing::error!(error = %e, "Failed to {}", action);
        SessionError::from(e)
    })
}

impl<E> SessionManager<E> {
    pub fn new(repository: Arc<dyn TabRepository>, filter: UrlFilter) -> Self {
        let (publisher, _) = watch::channel(SessionState::empty());

        Self {
            state: Arc::new(RwLock::new(SessionState::empty())),
            engines: Arc::new(RwLock::new(EngineHandles::new())),
            repository,
            filter: Arc::new(RwLock::new(filter)),
            publisher: Arc::new(publisher),
        }
    }

    /// Load persisted tabs, creating the home tab on first run
    pub fn initialize(&self) -> Result<SessionState> {
        let mut state = self.state.write();

        let tabs = persisted(
            self.repository.list_or_create(&TabRecord::home()),
            "load tabs",
        )?;

        *state = SessionState::from_tabs(tabs);

        let live: Vec<TabId> = state.tabs.iter().map(|t| t.id).collect();
        self.engines.write().retain_live(&live);

        self.publish(&state);

        tracing::info!(
            tab_count = state.tabs.len(),
            current_url = %state.current_url,
            "Initialized session"
        );

        Ok(state.clone())
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Receive a snapshot after every successful mutation
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.publisher.subscribe()
    }

    pub fn tab_count(&self) -> usize {
        self.state.read().tabs.len()
    }

    pub fn active_tab(&self) -> Option<TabRecord> {
        self.state.read().active_tab().cloned()
    }

    pub fn tab_id_at(&self, index: usize) -> Result<TabId> {
        Self::id_at(&self.state.read(), index)
    }

    /// Open a tab after the last one and make it active
    pub fn add_tab(&self, name: impl Into<String>, url: impl Into<String>) -> Result<TabRecord> {
        let draft = TabRecord::new(name, url)?;

        let mut state = self.state.write();
        let tab = persisted(self.repository.add_tab(&draft), "persist new tab")?;
        state.push_active(tab.clone());
        self.publish(&state);

        tracing::info!(
            tab_id = tab.id,
            url = %tab.url,
            index = state.tabs.len() - 1,
            "Created new tab"
        );

        Ok(tab)
    }

    /// Close a tab, deleting the stored record it was read from
    pub fn remove_tab(&self, tab: &TabRecord) -> Result<()> {
        self.remove_with(tab.id, |repository| repository.delete_tab(tab))
    }

    pub fn remove_tab_by_id(&self, id: TabId) -> Result<()> {
        self.remove_with(id, |repository| repository.remove_tab_by_id(id))
    }

    fn remove_with<F>(&self, id: TabId, persist: F) -> Result<()>
    where
        F: FnOnce(&dyn TabRepository) -> tabshell_tabs::Result<()>,
    {
        let mut state = self.state.write();
        let position = state.position_of(id).ok_or(SessionError::TabNotFound(id))?;

        persisted(persist(self.repository.as_ref()), "delete tab")?;

        state.remove_at(position);
        self.engines.write().remove(id);
        self.publish(&state);

        tracing::info!(
            tab_id = id,
            remaining = state.tabs.len(),
            active_index = state.active_index_signed(),
            "Closed tab"
        );

        Ok(())
    }

    /// Make the tab at `index` active. Selection is not persisted.
    pub fn select_tab(&self, index: usize) -> Result<()> {
        let mut state = self.state.write();
        Self::check_index(&state, index)?;

        state.select(index);
        self.publish(&state);

        tracing::debug!(index, url = %state.current_url, "Selected tab");

        Ok(())
    }

    pub fn url_filter(&self) -> UrlFilter {
        self.filter.read().clone()
    }

    pub fn set_url_filter(&self, filter: UrlFilter) {
        *self.filter.write() = filter;
    }

    /// Run `f` on the engine handle of the tab at `index`, creating an
    /// empty handle the first time the tab is displayed
    pub fn with_engine_handle<F, T>(&self, index: usize, f: F) -> Result<T>
    where
        F: FnOnce(&mut EngineHandle<E>) -> T,
    {
        let state = self.state.read();
        let id = Self::id_at(&state, index)?;
        let mut engines = self.engines.write();
        Ok(f(engines.get_or_create(id)))
    }

    /// Replace the engine handle of the tab at `index`
    pub fn update_engine_handle(
        &self,
        index: usize,
        handle: EngineHandle<E>,
    ) -> Result<Option<EngineHandle<E>>> {
        let state = self.state.read();
        let id = Self::id_at(&state, index)?;
        Ok(self.engines.write().update(id, handle))
    }

    pub fn has_engine_handle(&self, id: TabId) -> bool {
        self.engines.read().contains(id)
    }

    pub fn engine_handle_count(&self) -> usize {
        self.engines.read().len()
    }

    fn publish(&self, state: &SessionState) {
        debug_assert!(state.is_consistent());
        self.publisher.send_replace(state.clone());
    }

    fn check_index(state: &SessionState, index: usize) -> Result<()> {
        if index >= state.tabs.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: state.tabs.len(),
            });
        }
        Ok(())
    }

    fn id_at(state: &SessionState, index: usize) -> Result<TabId> {
        Self::check_index(state, index)?;
        Ok(state.tabs[index].id)
    }
}

impl<E: WebEngine> SessionManager<E> {
    /// Load search bar input in the tab at `index`
    ///
    /// Returns the normalized URL the tab now holds.
    pub fn navigate(&self, index: usize, input: &str) -> Result<String> {
        let url = self.filter.read().normalize(input);

        let id = {
            let mut state = self.state.write();
            let id = Self::id_at(&state, index)?;

            persisted(self.repository.update_url(id, &url), "persist tab URL")?;
            state.set_url(index, url.clone());
            self.publish(&state);
            id
        };

        tracing::info!(tab_id = id, url = %url, "Navigated tab");

        if is_acceptable(&url) {
            if let Some(handle) = self.engines.write().get_mut(id) {
                handle.load(&url);
            }
        }

        Ok(url)
    }

    /// Handle a navigation the engine of the tab at `index` reports
    ///
    /// Accepted URLs are persisted and published; anything else is kept out
    /// of the session and the engine is sent to the fallback page instead.
    pub fn on_engine_navigation(&self, index: usize, reported: &str) -> Result<NavigationDecision> {
        let decision = self.filter.read().filter_navigation(reported);

        match &decision {
            NavigationDecision::Accept(url) => {
                let id = {
                    let mut state = self.state.write();
                    let id = Self::id_at(&state, index)?;

                    if state.tabs[index].url != *url {
                        persisted(
                            self.repository.update_url(id, url),
                            "record engine navigation",
                        )?;
                        state.set_url(index, url.clone());
                        self.publish(&state);
                    }
                    id
                };

                self.engines.write().get_or_create(id).set_last_url(url.clone());
            }
            NavigationDecision::Redirect(fallback) => {
                let id = self.tab_id_at(index)?;
                if let Some(handle) = self.engines.write().get_mut(id) {
                    handle.load(fallback);
                }
            }
        }

        Ok(decision)
    }

    /// Reload the engine of the tab at `index`; false if none is attached yet
    pub fn reload(&self, index: usize) -> Result<bool> {
        let id = self.tab_id_at(index)?;
        Ok(self
            .engines
            .write()
            .get_mut(id)
            .is_some_and(|handle| handle.reload()))
    }
}

impl<E> Clone for SessionManager<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            engines: Arc::clone(&self.engines),
            repository: Arc::clone(&self.repository),
            filter: Arc::clone(&self.filter),
            publisher: Arc::clone(&self.publisher),
        }
    }
}
