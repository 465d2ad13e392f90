use crate::dom::{add_click_listener, event_closest, set_class, set_hidden, Listener};
use eunoia_core::page::{anchor_target, navbar_scrolled};
use web_sys as web;

const SCROLLED_CLASS: &str = "navbar-scrolled";

/// Navbar scroll styling, smooth in-page anchors and the mobile menu.
pub struct Nav {
    _listeners: Vec<Listener>,
}

impl Nav {
    pub fn mount(window: &web::Window, document: &web::Document) -> Self {
        let mut listeners = Vec::new();

        if let Some(navbar) = document.get_element_by_id("navbar") {
            let sync = {
                let window = window.clone();
                move || {
                    let y = window.scroll_y().unwrap_or(0.0);
                    set_class(&navbar, SCROLLED_CLASS, navbar_scrolled(y));
                }
            };
            sync();
            listeners.extend(Listener::new(window, "scroll", move |_| sync()));
        } else {
            log::warn!("[nav] missing #navbar");
        }

        {
            let document_for_click = document.clone();
            listeners.extend(Listener::new(document, "click", move |ev| {
                let Some(link) = event_closest(&ev, "a[href^=\"#\"]") else {
                    return;
                };
                let href = link.get_attribute("href").unwrap_or_default();
                let Some(target) = anchor_target(&href)
                    .and_then(|id| document_for_click.get_element_by_id(id))
                else {
                    return;
                };
                ev.prevent_default();
                let opts = web::ScrollIntoViewOptions::new();
                opts.set_behavior(web::ScrollBehavior::Smooth);
                target.scroll_into_view_with_scroll_into_view_options(&opts);
                if let Some(menu) = document_for_click.get_element_by_id("mobile-menu") {
                    set_hidden(&menu, true);
                }
            }));
        }

        {
            let document_for_menu = document.clone();
            listeners.extend(add_click_listener(document, "nav-menu-toggle", move || {
                if let Some(menu) = document_for_menu.get_element_by_id("mobile-menu") {
                    let _ = menu.class_list().toggle("hidden");
                }
            }));
        }

        Self {
            _listeners: listeners,
        }
    }
}
