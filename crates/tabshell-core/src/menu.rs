//! Bottom options sheet

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOption {
    Home,
    Bookmarks,
    Downloads,
    Recent,
    Settings,
    Exit,
    Incognito,
    Share,
    DarkMode,
    Close,
    Help,
}

/// Screens the options sheet can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Bookmarks,
    Downloads,
    History,
    Settings,
    Help,
}

/// What the UI has to do after a menu option was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Switch to another screen
    Open(Route),
    /// Hand this URL to the platform share sheet
    Share(String),
    /// Active tab closed
    TabClosed,
    /// Active tab now shows the home page
    WentHome,
    /// Presentation toggle the UI owns (incognito, dark mode)
    Toggle(MenuOption),
    /// Nothing to act on
    Ignored,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 11] = [
        MenuOption::Home,
        MenuOption::Bookmarks,
        MenuOption::Downloads,
        MenuOption::Recent,
        MenuOption::Settings,
        MenuOption::Exit,
        MenuOption::Incognito,
        MenuOption::Share,
        MenuOption::DarkMode,
        MenuOption::Close,
        MenuOption::Help,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::Home => "Home",
            MenuOption::Bookmarks => "Bookmarks",
            MenuOption::Downloads => "Download",
            MenuOption::Recent => "Recent",
            MenuOption::Settings => "Settings",
            MenuOption::Exit => "Exit",
            MenuOption::Incognito => "Incognito",
            MenuOption::Share => "Share",
            MenuOption::DarkMode => "Dark Mode",
            MenuOption::Close => "Close",
            MenuOption::Help => "Help",
        }
    }

    /// Screen this option opens, if it is a plain navigation entry
    pub fn route(&self) -> Option<Route> {
        match self {
            MenuOption::Bookmarks => Some(Route::Bookmarks),
            MenuOption::Downloads => Some(Route::Downloads),
            MenuOption::Recent => Some(Route::History),
            MenuOption::Settings => Some(Route::Settings),
            MenuOption::Help => Some(Route::Help),
            _ => None,
        }
    }
}

impl std::fmt::Display for MenuOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for MenuOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(MenuOption::Home),
            "bookmarks" | "website" => Ok(MenuOption::Bookmarks),
            "download" | "downloads" => Ok(MenuOption::Downloads),
            "recent" | "history" => Ok(MenuOption::Recent),
            "settings" => Ok(MenuOption::Settings),
            "exit" => Ok(MenuOption::Exit),
            "incognito" => Ok(MenuOption::Incognito),
            "share" => Ok(MenuOption::Share),
            "dark mode" | "dark m" => Ok(MenuOption::DarkMode),
            "close" => Ok(MenuOption::Close),
            "help" => Ok(MenuOption::Help),
            _ => Err(format!("Unknown menu option: {}", s)),
        }
    }
}
