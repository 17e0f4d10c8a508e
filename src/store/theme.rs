//! Theme catalog and the persisted theme selection

use super::{KeyValueStore, Result};

/// Storage key of the selected theme id
pub const THEME_KEY: &str = "theme";

pub const DEFAULT_THEME: &str = "blueOcean";

/// Class prefix applied to the document root
pub const THEME_CLASS_PREFIX: &str = "theme-";

/// Swatches shown on a theme card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreview {
    pub light: &'static str,
    pub default: &'static str,
    pub dark: &'static str,
}

/// Shown for ids missing from the catalog
pub const FALLBACK_PREVIEW: ThemePreview = ThemePreview {
    light: "#e5e7eb",
    default: "#d1d5db",
    dark: "#9ca3af",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub preview: ThemePreview,
}

pub const THEMES: [Theme; 5] = [
    Theme {
        id: "blueOcean",
        name: "Blue Ocean",
        preview: ThemePreview {
            light: "#00B4D8",
            default: "#0077B6",
            dark: "#03045E",
        },
    },
    Theme {
        id: "win11",
        name: "Windows 11",
        preview: ThemePreview {
            light: "#5B9BD5",
            default: "#2D89EF",
            dark: "#1E4E8C",
        },
    },
    Theme {
        id: "kaliLinuxNight",
        name: "Kali Linux Night",
        preview: ThemePreview {
            light: "#1A2436",
            default: "#0B1321",
            dark: "#3B0F7A",
        },
    },
    Theme {
        id: "macOsSunny",
        name: "MacOS Sunny",
        preview: ThemePreview {
            light: "#FFECB3",
            default: "#FFD700",
            dark: "#FFC107",
        },
    },
    Theme {
        id: "draculaPinkSoft",
        name: "Dracula Pink Soft",
        preview: ThemePreview {
            light: "#FF92D0",
            default: "#FF79C6",
            dark: "#FF5EAB",
        },
    },
];

pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

/// Preview swatches for any id, known or not
pub fn preview_for(id: &str) -> ThemePreview {
    find_theme(id).map(|t| t.preview).unwrap_or(FALLBACK_PREVIEW)
}

/// Root class for a theme id
pub fn theme_class(id: &str) -> String {
    format!("{}{}", THEME_CLASS_PREFIX, id)
}

/// Swap whatever theme class is on a class list for the given theme's
pub fn apply_class(classes: &mut Vec<String>, id: &str) {
    classes.retain(|c| !c.starts_with(THEME_CLASS_PREFIX));
    classes.push(theme_class(id));
}

/// Selected theme backed by local storage. Created once at startup.
#[derive(Debug)]
pub struct ThemeStore<S: KeyValueStore> {
    store: S,
    current: String,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Read the saved id, falling back to [`DEFAULT_THEME`]
    pub fn load(store: S) -> Self {
        let current = store
            .get(THEME_KEY)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        Self { store, current }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Select and persist a theme. Unknown ids are accepted as-is.
    pub fn set(&mut self, id: &str) -> Result<()> {
        self.current = id.to_string();
        self.store.set(THEME_KEY, id)?;
        tracing::debug!(theme = id, "Theme changed");
        Ok(())
    }

    pub fn class(&self) -> String {
        theme_class(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_theme() {
        let themes = ThemeStore::load(MemoryStore::new());
        assert_eq!(themes.current(), "blueOcean");
        assert_eq!(themes.class(), "theme-blueOcean");
    }

    #[test]
    fn test_set_persists_without_validation() {
        let store = MemoryStore::new();
        let mut themes = ThemeStore::load(store.clone());
        themes.set("win11").unwrap();
        assert_eq!(ThemeStore::load(store.clone()).current(), "win11");

        themes.set("neon").unwrap();
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("neon"));
        assert_eq!(preview_for("neon"), FALLBACK_PREVIEW);
    }

    #[test]
    fn test_apply_class_replaces_old_theme() {
        let mut classes = vec!["dark".to_string(), "theme-win11".to_string()];
        apply_class(&mut classes, "macOsSunny");
        assert_eq!(classes, vec!["dark", "theme-macOsSunny"]);
    }

    #[test]
    fn test_catalog() {
        assert_eq!(THEMES.len(), 5);
        assert_eq!(find_theme("kaliLinuxNight").unwrap().name, "Kali Linux Night");
    }
}
