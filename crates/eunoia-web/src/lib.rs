#![cfg(target_arch = "wasm32")]
use eunoia_core::{SiteConfig, TypewriterCycler};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod chat;
mod contact;
mod dom;
mod field;
mod hero;
mod nav;
mod theme;
mod timers;

use chat::ChatWidget;
use contact::ContactWidget;
use field::{FieldStyles, MountedField};
use nav::Nav;
use timers::BrowserScheduler;

/// Everything mounted on the page. Dropping it cancels timers, removes
/// listeners and takes the field nodes out of the DOM.
struct Page {
    hero: Option<TypewriterCycler<BrowserScheduler>>,
    chat: Option<ChatWidget>,
    _contact: Option<ContactWidget>,
    _theme: Option<dom::Listener>,
    _nav: Nav,
    _fields: Vec<MountedField>,
    _styles: Option<FieldStyles>,
}

impl Page {
    fn dispose(&self) {
        if let Some(hero) = &self.hero {
            hero.dispose();
        }
        if let Some(chat) = &self.chat {
            chat.dispose();
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("eunoia-web starting");

    if let Err(e) = mount() {
        log::error!("mount error: {:?}", e);
    }
    Ok(())
}

/// Tear the page down: pending timers are cancelled and fields removed.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|p| p.borrow_mut().take());
    if let Some(page) = page {
        page.dispose();
        drop(page);
        log::info!("eunoia-web unmounted");
    }
}

/// Mount again, e.g. after host markup was swapped out.
#[wasm_bindgen]
pub fn remount() -> Result<(), JsValue> {
    mount().map_err(|e| JsValue::from_str(&e.to_string()))
}

fn mount() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let mut config = SiteConfig::builtin().unwrap_or_else(|e| {
        log::warn!("[config] {e}; using defaults");
        SiteConfig::default()
    });
    config.seed = page_seed(config.seed);

    // Replaces any page mounted earlier.
    unmount();

    let scheduler = BrowserScheduler::new(window.clone());
    let styles = FieldStyles::mount(&document)
        .map_err(|e| log::error!("[field] stylesheet error: {:?}", e))
        .ok();
    let page = Page {
        _styles: styles,
        _fields: field::mount_all(&document, &config),
        hero: hero::mount(&document, &config.hero, scheduler.clone()),
        chat: ChatWidget::mount(&document, scheduler),
        _contact: ContactWidget::mount(&document),
        _theme: theme::mount(&window, &document),
        _nav: Nav::mount(&window, &document),
    };

    PAGE.with(|p| *p.borrow_mut() = Some(page));
    Ok(())
}

/// Fresh orb layout per page load, derived from the configured base seed.
fn page_seed(base: u64) -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => base ^ u64::from_le_bytes(buf),
        Err(e) => {
            log::warn!("[config] no entropy ({e}); using base seed");
            base
        }
    }
}
