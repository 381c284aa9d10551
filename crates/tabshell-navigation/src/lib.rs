//! TabShell Navigation
//!
//! Address bar input resolution:
//! 1. `"Home"` or empty → home page
//! 2. Address-like input → navigate (scheme added when missing)
//! 3. Anything else → search engine query
//!
//! Engine-reported navigation targets are only accepted over HTTP(S);
//! everything else is redirected to a fallback page.

mod error;
mod filter;
mod home;

pub use error::NavigationError;
pub use filter::{
    is_acceptable, InputResolution, NavigationDecision, UrlFilter, DEFAULT_FALLBACK_URL,
    DEFAULT_SEARCH_TEMPLATE,
};
pub use home::{default_shortcuts, HomeShortcut};

pub type Result<T> = std::result::Result<T, NavigationError>;
