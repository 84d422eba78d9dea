// =====================================================
// FILE: src/commands/theme/manager.rs - LIGHT/DARK THEME
// =====================================================

use crate::core::constants::DARK_MODE_CLASS;
use crate::core::prelude::*;
use crate::store::{StoreHandle, THEME_KEY};
use crate::view::document::Document;
use crate::view::header::{theme_icon, THEME_TOGGLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `"dark"` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ThemeManager {
    store: StoreHandle,
}

impl ThemeManager {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Persisted theme; unreadable storage counts as light.
    pub fn stored_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(value) => Theme::from_stored(value.as_deref()),
            Err(e) => {
                log::warn!("Could not read theme: {}", e);
                Theme::Light
            }
        }
    }

    /// Theme currently shown by the document.
    pub fn displayed_theme(document: &Document) -> Theme {
        if document.has_class(DARK_MODE_CLASS) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Runs before any other rendering of a page.
    pub fn apply_stored_theme(&self, document: &mut Document) -> Theme {
        let theme = self.stored_theme();
        Self::render(document, theme);
        theme
    }

    pub fn set_theme(&self, document: &mut Document, theme: Theme) -> Result<Theme> {
        Self::render(document, theme);
        self.store.set(THEME_KEY, theme.as_str())?;
        log::debug!("Theme set to {}", theme);
        Ok(theme)
    }

    /// Flips what the document shows and persists the result immediately.
    pub fn toggle_theme(&self, document: &mut Document) -> Result<Theme> {
        let next = Self::displayed_theme(document).toggled();
        self.set_theme(document, next)
    }

    fn render(document: &mut Document, theme: Theme) {
        if theme.is_dark() {
            document.add_class(DARK_MODE_CLASS);
        } else {
            document.remove_class(DARK_MODE_CLASS);
        }
        document.set_text(THEME_TOGGLE, theme_icon(theme.is_dark()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::view::header::header_elements;

    fn setup() -> (ThemeManager, Document) {
        let store = StoreHandle::new(Arc::new(MemoryStore::new()));
        let mut doc = Document::new();
        doc.extend(header_elements());
        (ThemeManager::new(store), doc)
    }

    #[test]
    fn default_is_light() {
        let (themes, mut doc) = setup();
        assert_eq!(themes.apply_stored_theme(&mut doc), Theme::Light);
        assert!(!doc.has_class(DARK_MODE_CLASS));
        assert_eq!(doc.text(THEME_TOGGLE), Some("☀️"));
    }

    #[test]
    fn unknown_stored_value_reads_as_light() {
        assert_eq!(Theme::from_stored(Some("solarized")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn toggle_twice_restores_and_persists() {
        let (themes, mut doc) = setup();
        themes.apply_stored_theme(&mut doc);

        assert_eq!(themes.toggle_theme(&mut doc).unwrap(), Theme::Dark);
        assert_eq!(themes.stored_theme(), Theme::Dark);
        assert!(doc.has_class(DARK_MODE_CLASS));
        assert_eq!(doc.text(THEME_TOGGLE), Some("🌙"));

        assert_eq!(themes.toggle_theme(&mut doc).unwrap(), Theme::Light);
        assert_eq!(themes.stored_theme(), Theme::Light);
    }

    #[test]
    fn stored_theme_survives_reload() {
        let (themes, mut doc) = setup();
        themes.set_theme(&mut doc, Theme::Dark).unwrap();

        let mut reloaded = Document::new();
        reloaded.extend(header_elements());
        assert_eq!(themes.apply_stored_theme(&mut reloaded), Theme::Dark);
        assert!(reloaded.has_class(DARK_MODE_CLASS));
    }
}
