use crate::dom::{add_click_listener, set_class, Listener};
use eunoia_core::theme::{DARK_CLASS, THEME_STORAGE_KEY};
use eunoia_core::Theme;
use web_sys as web;

fn storage(window: &web::Window) -> Option<web::Storage> {
    window.local_storage().ok().flatten()
}

/// Saved preference, else the system colour scheme.
pub fn initial_theme(window: &web::Window) -> Theme {
    let saved = storage(window).and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    let prefers_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    Theme::resolve(saved.as_deref(), prefers_dark)
}

pub fn apply(document: &web::Document, theme: Theme) {
    if let Some(root) = document.document_element() {
        set_class(&root, DARK_CLASS, theme.is_dark());
    }
    if let Some(button) = document.get_element_by_id("theme-toggle") {
        let _ = button.set_attribute("aria-label", theme.toggle_label());
    }
}

/// Apply the initial theme and wire `#theme-toggle`.
pub fn mount(window: &web::Window, document: &web::Document) -> Option<Listener> {
    let mut theme = initial_theme(window);
    apply(document, theme);
    log::info!("[theme] {}", theme.as_str());

    let window = window.clone();
    let doc = document.clone();
    add_click_listener(document, "theme-toggle", move || {
        let next = theme.toggled();
        theme = next;
        if let Some(s) = storage(&window) {
            if let Err(e) = s.set_item(THEME_STORAGE_KEY, next.as_str()) {
                log::warn!("[theme] could not save preference: {:?}", e);
            }
        }
        apply(&doc, next);
        log::info!("[theme] switched to {}", next.as_str());
    })
}
