//! Light/dark theme preference and toggle.
//!
//! The stored value under the preference key is `dark` or `light`; anything
//! else, including nothing, loads as light. Storage is behind
//! [`PreferenceStore`] so the toggle is testable without a browser.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

pub const DEFAULT_THEME_KEY: &str = "preferred-theme";

/// Id of the toggle button.
pub const TOGGLE_ID: &str = "themeToggle";

/// Class set on `<body>` while dark.
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Interpret a stored preference. Only `dark` selects dark.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Icon classes for the toggle button: a sun offers the way back to
    /// light, a moon offers dark.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Dark => "fa-solid fa-sun",
            Theme::Light => "fa-solid fa-moon",
        }
    }
}

/// Key/value storage for the single theme preference.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// The current theme plus where it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggle {
    key: String,
    theme: Theme,
}

impl ThemeToggle {
    /// Read the stored preference under `key`.
    pub fn load(store: &impl PreferenceStore, key: &str) -> Self {
        let theme = Theme::from_stored(store.get(key).as_deref());
        tracing::debug!(key, theme = theme.as_str(), "theme loaded");
        Self { key: key.to_owned(), theme }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Flip the theme and persist it. Returns the new theme for the caller
    /// to apply.
    pub fn toggle(&mut self, store: &mut impl PreferenceStore) -> Theme {
        self.theme = self.theme.toggled();
        store.set(&self.key, self.theme.as_str());
        self.theme
    }
}
