//! TabShell Core
//!
//! Central coordination layer: wires storage, tabs, navigation and the
//! session together behind [`Browser`]. The UI only renders snapshots and
//! forwards events; it never mutates tab state itself.

mod browser;
mod config;
mod error;
mod menu;

pub use browser::Browser;
pub use config::Config;
pub use error::CoreError;
pub use menu::{MenuOption, MenuOutcome, Route};

// Re-export core components
pub use tabshell_navigation::{
    default_shortcuts, is_acceptable, HomeShortcut, InputResolution, NavigationDecision,
    NavigationError, UrlFilter,
};
pub use tabshell_session::{
    EngineHandle, EngineHandles, SessionError, SessionManager, SessionState, WebEngine,
};
pub use tabshell_storage::{Database, StorageError};
pub use tabshell_tabs::{TabError, TabIcon, TabId, TabRecord, TabRepository, HOME_URL};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// Leaves an already installed global subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        init_logging();
        tracing::info!("still logging");
    }
}
