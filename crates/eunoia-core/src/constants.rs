// Shared visual and timing tuning constants used by both web and native frontends.

// Field defaults
pub const DEFAULT_ORB_COUNT: i32 = 8;
pub const DEFAULT_MAX_OPACITY: f32 = 0.7;

// Orb sizes per density, pixel diameter (inclusive)
pub const LOW_DENSITY_SIZE: (u32, u32) = (100, 250);
pub const MEDIUM_DENSITY_SIZE: (u32, u32) = (60, 200);
pub const HIGH_DENSITY_SIZE: (u32, u32) = (30, 150);

// Orb count multipliers per density (applied at generation time only)
pub const LOW_DENSITY_MULTIPLIER: f32 = 1.0;
pub const MEDIUM_DENSITY_MULTIPLIER: f32 = 1.5;
pub const HIGH_DENSITY_MULTIPLIER: f32 = 2.5;

// Placement, in container percentages. Quadrants overlap the edges so orbs can
// bleed off-screen.
pub const POSITION_MIN_PCT: f32 = -10.0;
pub const POSITION_SPLIT_PCT: f32 = 50.0;
pub const POSITION_MAX_PCT: f32 = 110.0;

// Pulse animation timing (seconds)
pub const ORB_DELAY_MAX_SEC: f32 = 5.0;
pub const ORB_DURATION_MIN_SEC: f32 = 8.0;
pub const ORB_DURATION_MAX_SEC: f32 = 20.0;

pub const ORB_MIN_OPACITY: f32 = 0.2;
pub const COLOR_OVERRIDE_PROBABILITY: f64 = 0.3; // per-orb chance to ignore the field variant

pub const ORB_BLUR_PX: u32 = 40;

// Typewriter defaults (milliseconds)
pub const TYPING_SPEED_MS: u64 = 100;
pub const DELETING_SPEED_MS: u64 = 50;
pub const DELAY_BETWEEN_MS: u64 = 2000;
pub const TYPEWRITER_CARET: char = '|';
pub const MIN_TICK_MS: u64 = 1; // floor for zero durations so a cycle always advances the clock

// Chat assistant timings (milliseconds)
pub const CHAT_WELCOME_DELAY_MS: u64 = 700;
pub const CHAT_REPLY_DELAY_MS: u64 = 1500;
pub const CHAT_FOCUS_DELAY_MS: u64 = 300;

// Navbar switches to its solid style past this scroll offset (CSS px)
pub const NAVBAR_SCROLL_THRESHOLD_PX: f64 = 20.0;
