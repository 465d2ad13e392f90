// Host-side tests for theme resolution and page helpers.

use eunoia_core::page::{anchor_target, navbar_scrolled, NAV_LINKS};
use eunoia_core::Theme;

#[test]
fn saved_preference_wins_over_system() {
    assert_eq!(Theme::resolve(Some("light"), true), Theme::Light);
    assert_eq!(Theme::resolve(Some("dark"), false), Theme::Dark);
}

#[test]
fn system_preference_applies_without_saved_value() {
    assert_eq!(Theme::resolve(None, true), Theme::Dark);
    assert_eq!(Theme::resolve(None, false), Theme::Light);
}

#[test]
fn unrecognised_saved_value_falls_back_to_system() {
    assert_eq!(Theme::resolve(Some("sepia"), true), Theme::Dark);
    assert_eq!(Theme::resolve(Some(""), false), Theme::Light);
}

#[test]
fn toggle_flips_and_labels_follow() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert!(Theme::Dark.is_dark());
    assert_eq!(Theme::Light.toggle_label(), "Switch to dark mode");
    assert_eq!(Theme::Dark.as_str(), "dark");
    assert_eq!("dark".parse::<Theme>().ok(), Some(Theme::Dark));
}

#[test]
fn navbar_switches_past_threshold() {
    assert!(!navbar_scrolled(0.0));
    assert!(!navbar_scrolled(20.0));
    assert!(navbar_scrolled(20.5));
}

#[test]
fn anchors_resolve_to_section_ids() {
    let targets: Vec<_> = NAV_LINKS.iter().filter_map(|l| anchor_target(l.href)).collect();
    assert_eq!(targets, ["about", "services", "ethos", "contact"]);
    assert_eq!(anchor_target("#"), None);
    assert_eq!(anchor_target("/pricing"), None);
}
