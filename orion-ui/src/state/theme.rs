//! Theme Provider
//!
//! One [`ThemeStore`] for the whole app, created at startup and shared
//! through context. The selected id is mirrored on `<html>` as a
//! `theme-<id>` class.

use leptos::*;
use orion::store::theme::apply_class;
use orion::store::ThemeStore;

use super::storage::BrowserStore;

#[derive(Clone, Copy)]
pub struct ThemeContext {
    /// Active theme id
    pub theme: ReadSignal<String>,
    set_theme: WriteSignal<String>,
}

impl ThemeContext {
    /// Select a theme. Ids are not validated.
    pub fn set(&self, id: &str) {
        self.set_theme.set(id.to_string());
    }
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found")
}

/// Swap the `theme-*` class on the document root
fn apply_to_document(id: &str) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let mut classes: Vec<String> = root
        .class_name()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    apply_class(&mut classes, id);
    root.set_class_name(&classes.join(" "));
}

pub fn provide_theme() {
    let store = ThemeStore::load(BrowserStore);
    let (theme, set_theme) = create_signal(store.current().to_string());
    let store = store_value(store);

    create_effect(move |_| {
        let id = theme.get();
        apply_to_document(&id);
        store.update_value(|s| {
            if let Err(e) = s.set(&id) {
                web_sys::console::error_1(&format!("Failed to save theme: {}", e).into());
            }
        });
    });

    provide_context(ThemeContext { theme, set_theme });
}
