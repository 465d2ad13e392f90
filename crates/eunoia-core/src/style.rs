//! Inline CSS for orbs and their field container.
//!
//! The pulse itself is a keyframe in [`stylesheet`]; each orb only carries its
//! own geometry, gradient, peak opacity and timing.

use crate::constants::ORB_BLUR_PX;
use crate::field::{ColorVariant, Orb};

pub const ORB_CLASS: &str = "plasma-orb";
pub const FIELD_CLASS: &str = "plasma-container absolute inset-0 pointer-events-none";
pub const PULSE_ANIMATION: &str = "plasma-pulse";
/// Id of the `<style>` element the web frontend injects.
pub const STYLESHEET_ID: &str = "eunoia-field-styles";

/// Share of its peak opacity an orb fades down to between pulses.
const PULSE_LOW: f32 = 0.4;

impl ColorVariant {
    /// Inner and outer gradient stops as `rgba(...)` strings.
    pub fn gradient_stops(self) -> (&'static str, &'static str) {
        match self {
            ColorVariant::Purple => ("rgba(74, 58, 255, 0.8)", "rgba(167, 139, 250, 0)"),
            ColorVariant::Blue => ("rgba(59, 130, 246, 0.8)", "rgba(147, 197, 253, 0)"),
            ColorVariant::Gold => ("rgba(240, 180, 41, 0.8)", "rgba(253, 230, 138, 0)"),
            ColorVariant::Teal => ("rgba(20, 184, 166, 0.8)", "rgba(153, 246, 228, 0)"),
            ColorVariant::Mixed => ("rgba(123, 104, 238, 0.8)", "rgba(240, 180, 41, 0)"),
        }
    }

    pub fn gradient_css(self) -> String {
        let (inner, outer) = self.gradient_stops();
        format!("radial-gradient(circle at 30% 30%, {inner}, {outer} 70%)")
    }
}

/// Full inline style for one orb.
pub fn orb_style(orb: &Orb) -> String {
    format!(
        "position:absolute;border-radius:9999px;pointer-events:none;\
         width:{size}px;height:{size}px;left:{x:.2}%;top:{y:.2}%;\
         --orb-opacity:{opacity:.3};opacity:{opacity:.3};filter:blur({blur}px);background:{gradient};\
         animation:{anim} {duration:.2}s ease-in-out {delay:.2}s infinite;",
        size = orb.size,
        x = orb.position.x,
        y = orb.position.y,
        opacity = orb.opacity,
        blur = ORB_BLUR_PX,
        gradient = orb.color.gradient_css(),
        anim = PULSE_ANIMATION,
        duration = orb.duration_sec,
        delay = orb.delay_sec,
    )
}

/// Rules the inline orb styles rely on: the pulse keyframes, which swing each
/// orb between a fraction of its `--orb-opacity` and the full value, plus the
/// `hidden` utility the widgets toggle.
pub fn stylesheet() -> String {
    format!(
        "@keyframes {anim} {{\
         0%, 100% {{ opacity: calc(var(--orb-opacity, 0.2) * {low}); transform: scale(1); }}\
         50% {{ opacity: var(--orb-opacity, 0.2); transform: scale(1.1); }}\
         }}\n\
         .{orb} {{ position: absolute; border-radius: 9999px; pointer-events: none; will-change: opacity, transform; }}\n\
         .hidden {{ display: none !important; }}\n\
         @media (prefers-reduced-motion: reduce) {{ .{orb} {{ animation: none !important; }} }}\n",
        anim = PULSE_ANIMATION,
        orb = ORB_CLASS,
        low = PULSE_LOW,
    )
}

/// Container classes: the base field classes followed by the caller's
/// passthrough (e.g. an opacity utility).
pub fn field_class(extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        FIELD_CLASS.to_string()
    } else {
        format!("{FIELD_CLASS} {extra}")
    }
}
