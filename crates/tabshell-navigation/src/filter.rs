//! URL filter for the search bar and the web engine
//!
//! `normalize` turns free text into something a tab can hold;
//! `filter_navigation` gates what the engine reports back.

use serde::{Deserialize, Serialize};
use url::Url;

use tabshell_tabs::HOME_URL;

use crate::error::NavigationError;
use crate::Result;

pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";
pub const DEFAULT_FALLBACK_URL: &str = "https://www.google.com";

/// Result of resolving search bar input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputResolution {
    /// Show the home page
    Home,
    /// Load an address directly
    Navigate(String),
    /// Query the search engine
    Search(String),
}

impl InputResolution {
    pub fn into_url(self) -> String {
        match self {
            InputResolution::Home => HOME_URL.to_string(),
            InputResolution::Navigate(url) | InputResolution::Search(url) => url,
        }
    }
}

/// What to do with a URL the engine reports it is navigating to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Propagate to the session
    Accept(String),
    /// Do not propagate; load this URL in the engine instead
    Redirect(String),
}

/// True iff the URL uses a scheme the shell lets tabs display
pub fn is_acceptable(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[derive(Debug, Clone)]
pub struct UrlFilter {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
    /// Where the engine is sent when it tries to leave HTTP(S)
    fallback_url: String,
}

impl UrlFilter {
    pub fn new() -> Self {
        Self {
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
        }
    }

    pub fn with_search_engine(template: String) -> Result<Self> {
        let mut filter = Self::new();
        filter.set_search_engine(template)?;
        Ok(filter)
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        if !template.contains("%s") || !is_acceptable(&template) {
            return Err(NavigationError::InvalidSearchTemplate(template));
        }
        self.search_template = template;
        Ok(())
    }

    pub fn set_fallback_url(&mut self, url: String) -> Result<()> {
        if !is_acceptable(&url) || Url::parse(&url).is_err() {
            return Err(NavigationError::InvalidUrl(url));
        }
        self.fallback_url = url;
        Ok(())
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Resolve search bar input into an action
    pub fn resolve(&self, input: &str) -> InputResolution {
        let input = input.trim();

        if input.is_empty() || input == HOME_URL {
            return InputResolution::Home;
        }

        if let Some(url) = self.try_parse_address(input) {
            return InputResolution::Navigate(url);
        }

        InputResolution::Search(self.build_search_url(input))
    }

    /// Free text → URL a tab can hold (`"Home"`, an address, or a search URL)
    pub fn normalize(&self, input: &str) -> String {
        self.resolve(input).into_url()
    }

    pub fn is_acceptable(&self, url: &str) -> bool {
        is_acceptable(url)
    }

    /// Gate a navigation target reported by the web engine
    pub fn filter_navigation(&self, reported: &str) -> NavigationDecision {
        if is_acceptable(reported) {
            NavigationDecision::Accept(reported.to_string())
        } else {
            tracing::warn!(
                url = %reported,
                fallback = %self.fallback_url,
                "Rejected engine navigation"
            );
            NavigationDecision::Redirect(self.fallback_url.clone())
        }
    }

    fn try_parse_address(&self, input: &str) -> Option<String> {
        if is_acceptable(input) {
            return Url::parse(input).ok().map(|_| input.to_string());
        }

        // Some other scheme; never hand it to the engine as an address
        if input.contains("://") {
            return None;
        }

        if input.contains('.') && !input.contains(char::is_whitespace) {
            let with_https = format!("https://{}", input);
            let parsed = Url::parse(&with_https).ok()?;
            if parsed.host_str().is_some_and(has_host_labels) {
                return Some(with_https);
            }
        }

        None
    }

    fn build_search_url(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.search_template.replace("%s", &encoded)
    }
}

/// Every dot-separated label is non-empty, ignoring one trailing root dot
fn has_host_labels(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    !host.is_empty() && host.split('.').all(|label| !label.is_empty())
}

impl Default for UrlFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_address() {
        let filter = UrlFilter::new();
        assert_eq!(filter.normalize("google.com"), "https://google.com");
        assert_eq!(filter.normalize("  example.com/path?q=1 "), "https://example.com/path?q=1");
        assert_eq!(filter.normalize("http://example.com"), "http://example.com");
        assert_eq!(filter.normalize("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_normalize_search() {
        let filter = UrlFilter::new();
        assert_eq!(
            filter.normalize("weather today"),
            "https://www.google.com/search?q=weather+today"
        );
        // A dot alone does not make an address when there are spaces
        assert_eq!(
            filter.normalize("rust 1.80 release"),
            "https://www.google.com/search?q=rust+1.80+release"
        );
        assert_eq!(
            filter.normalize("c++ & rust"),
            "https://www.google.com/search?q=c%2B%2B+%26+rust"
        );
    }

    #[test]
    fn test_dots_without_host_become_search() {
        let filter = UrlFilter::new();
        for input in [".", "...", ".com", "example..com"] {
            match filter.resolve(input) {
                InputResolution::Search(url) => {
                    assert!(url.starts_with("https://www.google.com/search?q="), "{}", url)
                }
                other => panic!("Expected Search for {:?}, got {:?}", input, other),
            }
        }
        assert_eq!(filter.normalize("127.0.0.1:8080"), "https://127.0.0.1:8080");
        assert_eq!(filter.normalize("example.com."), "https://example.com.");
    }

    #[test]
    fn test_normalize_home() {
        let filter = UrlFilter::new();
        assert_eq!(filter.normalize("Home"), HOME_URL);
        assert_eq!(filter.normalize("   "), HOME_URL);
        assert_eq!(filter.resolve(""), InputResolution::Home);
    }

    #[test]
    fn test_foreign_scheme_becomes_search() {
        let filter = UrlFilter::new();
        match filter.resolve("ftp://files.example.com") {
            InputResolution::Search(url) => assert!(url.starts_with("https://www.google.com/")),
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    #[test]
    fn test_is_acceptable() {
        assert!(!is_acceptable("ftp://x"));
        assert!(!is_acceptable("javascript:alert(1)"));
        assert!(!is_acceptable("Home"));
        assert!(is_acceptable("https://x"));
        assert!(is_acceptable("http://x"));
    }

    #[test]
    fn test_filter_navigation() {
        let filter = UrlFilter::new();
        assert_eq!(
            filter.filter_navigation("https://example.com"),
            NavigationDecision::Accept("https://example.com".to_string())
        );
        assert_eq!(
            filter.filter_navigation("intent://scan/#Intent;end"),
            NavigationDecision::Redirect(DEFAULT_FALLBACK_URL.to_string())
        );
    }

    #[test]
    fn test_custom_search_engine() {
        let filter =
            UrlFilter::with_search_engine("https://duckduckgo.com/?q=%s".to_string()).unwrap();
        assert_eq!(
            filter.normalize("rust programming"),
            "https://duckduckgo.com/?q=rust+programming"
        );

        assert!(UrlFilter::with_search_engine("https://example.com".to_string()).is_err());
        assert!(UrlFilter::with_search_engine("ftp://example.com/%s".to_string()).is_err());
    }

    #[test]
    fn test_fallback_must_be_acceptable() {
        let mut filter = UrlFilter::new();
        assert!(filter.set_fallback_url("about:blank".to_string()).is_err());
        filter
            .set_fallback_url("https://duckduckgo.com".to_string())
            .unwrap();
        assert_eq!(
            filter.filter_navigation("file:///etc/passwd"),
            NavigationDecision::Redirect("https://duckduckgo.com".to_string())
        );
    }
}
