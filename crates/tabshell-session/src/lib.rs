//! TabShell Session Management
//!
//! - The session is the ordered tab strip plus the active tab
//! - Every mutation is persisted before it becomes visible
//! - Subscribers receive a fresh snapshot after each mutation
//! - Each tab keeps its web engine alive across tab switches

mod engine;
mod error;
mod manager;
mod state;

pub use engine::{EngineHandle, EngineHandles, WebEngine};
pub use error::SessionError;
pub use manager::SessionManager;
pub use state::SessionState;

pub type Result<T> = std::result::Result<T, SessionError>;
