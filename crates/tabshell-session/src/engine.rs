//! Per-tab web engine handles
//!
//! The embedded engine is created by the UI the first time a tab is shown.
//! Its handle lives here so switching tabs keeps scroll position and
//! history; the handle goes away with the tab.

use std::collections::HashMap;

use tabshell_tabs::TabId;

/// Contract the embedded web-rendering engine has to offer
pub trait WebEngine {
    /// URL the engine is currently showing, if any
    fn current_url(&self) -> Option<String>;

    fn load(&mut self, url: &str);

    fn reload(&mut self);
}

#[derive(Debug)]
pub struct EngineHandle<E> {
    engine: Option<E>,
    last_url: Option<String>,
}

impl<E> EngineHandle<E> {
    pub fn new() -> Self {
        Self {
            engine: None,
            last_url: None,
        }
    }

    pub fn with_engine(engine: E) -> Self {
        Self {
            engine: Some(engine),
            last_url: None,
        }
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Bind an engine, returning the one it replaces
    pub fn attach(&mut self, engine: E) -> Option<E> {
        self.engine.replace(engine)
    }

    pub fn take_engine(&mut self) -> Option<E> {
        self.engine.take()
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub fn last_url(&self) -> Option<&str> {
        self.last_url.as_deref()
    }

    pub fn set_last_url(&mut self, url: impl Into<String>) {
        self.last_url = Some(url.into());
    }
}

impl<E: WebEngine> EngineHandle<E> {
    /// Load `url` in the bound engine; no-op until an engine is attached
    pub fn load(&mut self, url: &str) -> bool {
        match self.engine.as_mut() {
            Some(engine) => {
                engine.load(url);
                self.last_url = Some(url.to_string());
                true
            }
            None => false,
        }
    }

    pub fn reload(&mut self) -> bool {
        match self.engine.as_mut() {
            Some(engine) => {
                engine.reload();
                true
            }
            None => false,
        }
    }
}

impl<E> Default for EngineHandle<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine handles keyed by tab id
#[derive(Debug)]
pub struct EngineHandles<E> {
    handles: HashMap<TabId, EngineHandle<E>>,
}

impl<E> EngineHandles<E> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    pub fn get_or_create(&mut self, id: TabId) -> &mut EngineHandle<E> {
        self.handles.entry(id).or_insert_with(|| {
            tracing::debug!(tab_id = id, "Created engine handle");
            EngineHandle::new()
        })
    }

    pub fn get(&self, id: TabId) -> Option<&EngineHandle<E>> {
        self.handles.get(&id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut EngineHandle<E>> {
        self.handles.get_mut(&id)
    }

    /// Replace the handle for a tab, returning the previous one
    pub fn update(&mut self, id: TabId, handle: EngineHandle<E>) -> Option<EngineHandle<E>> {
        self.handles.insert(id, handle)
    }

    pub fn remove(&mut self, id: TabId) -> Option<EngineHandle<E>> {
        let removed = self.handles.remove(&id);
        if removed.is_some() {
            tracing::debug!(tab_id = id, "Dropped engine handle");
        }
        removed
    }

    /// Drop every handle whose tab is not in `live`
    pub fn retain_live(&mut self, live: &[TabId]) {
        self.handles.retain(|id, _| live.contains(id));
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = TabId> + '_ {
        self.handles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<E> Default for EngineHandles<E> {
    fn default() -> Self {
        Self::new()
    }
}
