use crate::constants::NAVBAR_SCROLL_THRESHOLD_PX;

/// A navbar entry: label and in-page anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink {
        label: "About",
        href: "#about",
    },
    NavLink {
        label: "Services",
        href: "#services",
    },
    NavLink {
        label: "Our Ethos",
        href: "#ethos",
    },
    NavLink {
        label: "Contact",
        href: "#contact",
    },
];

/// Navbar switches to its solid, blurred style once the page has scrolled.
#[inline]
pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD_PX
}

/// Element id an in-page anchor points at, if any. A bare `#` targets nothing.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}
