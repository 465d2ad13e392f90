use crate::constants::*;
use crate::error::{Error, Result};
use glam::Vec2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named tier controlling orb size range and how many orbs a field spawns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    pub const ALL: [Density; 3] = [Density::Low, Density::Medium, Density::High];

    /// Inclusive pixel diameter bounds for orbs at this density.
    pub fn size_range(self) -> (u32, u32) {
        match self {
            Density::Low => LOW_DENSITY_SIZE,
            Density::Medium => MEDIUM_DENSITY_SIZE,
            Density::High => HIGH_DENSITY_SIZE,
        }
    }

    pub fn count_multiplier(self) -> f32 {
        match self {
            Density::Low => LOW_DENSITY_MULTIPLIER,
            Density::Medium => MEDIUM_DENSITY_MULTIPLIER,
            Density::High => HIGH_DENSITY_MULTIPLIER,
        }
    }

    /// Number of orbs a generation pass produces for `orb_count`.
    ///
    /// Fractional results round up; zero or negative counts give an empty field.
    pub fn effective_count(self, orb_count: i32) -> usize {
        if orb_count <= 0 {
            return 0;
        }
        (orb_count as f32 * self.count_multiplier()).ceil() as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Density::Low => "low",
            Density::Medium => "medium",
            Density::High => "high",
        }
    }
}

impl FromStr for Density {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Density::Low),
            "medium" => Ok(Density::Medium),
            "high" => Ok(Density::High),
            _ => Err(Error::UnknownDensity(s.to_string())),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette key applied to an orb's gradient fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    #[default]
    Purple,
    Blue,
    Gold,
    Teal,
    Mixed,
}

impl ColorVariant {
    pub const ALL: [ColorVariant; 5] = [
        ColorVariant::Purple,
        ColorVariant::Blue,
        ColorVariant::Gold,
        ColorVariant::Teal,
        ColorVariant::Mixed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorVariant::Purple => "purple",
            ColorVariant::Blue => "blue",
            ColorVariant::Gold => "gold",
            ColorVariant::Teal => "teal",
            ColorVariant::Mixed => "mixed",
        }
    }
}

impl FromStr for ColorVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ColorVariant::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownColorVariant(s.to_string()))
    }
}

impl fmt::Display for ColorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of four overlapping screen regions used to spread orbs evenly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Round-robin assignment: orb `i` lands in quadrant `i mod 4`.
    pub fn for_index(i: usize) -> Self {
        match i % 4 {
            0 => Quadrant::TopLeft,
            1 => Quadrant::TopRight,
            2 => Quadrant::BottomLeft,
            _ => Quadrant::BottomRight,
        }
    }

    /// Half-open horizontal range in container percent.
    pub fn x_range(self) -> (f32, f32) {
        match self {
            Quadrant::TopLeft | Quadrant::BottomLeft => (POSITION_MIN_PCT, POSITION_SPLIT_PCT),
            Quadrant::TopRight | Quadrant::BottomRight => (POSITION_SPLIT_PCT, POSITION_MAX_PCT),
        }
    }

    /// Half-open vertical range in container percent.
    pub fn y_range(self) -> (f32, f32) {
        match self {
            Quadrant::TopLeft | Quadrant::TopRight => (POSITION_MIN_PCT, POSITION_SPLIT_PCT),
            Quadrant::BottomLeft | Quadrant::BottomRight => (POSITION_SPLIT_PCT, POSITION_MAX_PCT),
        }
    }

    pub fn contains(self, position: Vec2) -> bool {
        let (x0, x1) = self.x_range();
        let (y0, y1) = self.y_range();
        position.x >= x0 && position.x < x1 && position.y >= y0 && position.y < y1
    }
}

/// Configuration for a single ambient field, supplied once by its section.
///
/// Fields:
/// - `orb_count`: requested orb count before the density multiplier; not validated
/// - `density`: size range and count multiplier tier
/// - `color_variant`: default palette entry for the field's orbs
/// - `max_opacity`: exclusive upper bound for per-orb opacity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub orb_count: i32,
    pub density: Density,
    pub color_variant: ColorVariant,
    pub max_opacity: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            orb_count: DEFAULT_ORB_COUNT,
            density: Density::Medium,
            color_variant: ColorVariant::Purple,
            max_opacity: DEFAULT_MAX_OPACITY,
        }
    }
}

impl FieldConfig {
    pub fn effective_count(&self) -> usize {
        self.density.effective_count(self.orb_count)
    }
}

/// A single decorative orb. All values are drawn once at generation time.
///
/// Fields:
/// - `size`: pixel diameter
/// - `position`: (x, y) in container percent, may lie slightly outside 0..100
/// - `quadrant`: region the position was drawn from
/// - `color`: palette entry for the gradient
/// - `opacity`: peak opacity of the pulse
/// - `delay_sec` / `duration_sec`: pulse animation offset and period
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Orb {
    pub size: u32,
    pub position: Vec2,
    pub quadrant: Quadrant,
    pub color: ColorVariant,
    pub opacity: f32,
    pub delay_sec: f32,
    pub duration_sec: f32,
}

/// Generate the orbs of a field. Pure: the same config and seed always yield
/// the same orbs.
pub fn generate_field(config: &FieldConfig, seed: u64) -> Vec<Orb> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (size_min, size_max) = config.density.size_range();
    let count = config.effective_count();

    let orbs = (0..count)
        .map(|i| {
            let quadrant = Quadrant::for_index(i);
            let (x0, x1) = quadrant.x_range();
            let (y0, y1) = quadrant.y_range();
            let x = rng.gen_range(x0..x1);
            let y = rng.gen_range(y0..y1);
            let size = rng.gen_range(size_min..=size_max);
            let delay_sec = rng.gen_range(0.0..ORB_DELAY_MAX_SEC);
            let duration_sec = rng.gen_range(ORB_DURATION_MIN_SEC..ORB_DURATION_MAX_SEC);
            let color = if rng.gen_bool(COLOR_OVERRIDE_PROBABILITY) {
                ColorVariant::ALL
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(config.color_variant)
            } else {
                config.color_variant
            };
            let opacity = draw_opacity(&mut rng, config.max_opacity);
            Orb {
                size,
                position: Vec2::new(x, y),
                quadrant,
                color,
                opacity,
                delay_sec,
                duration_sec,
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "[field] generated {} orbs (requested={} density={} variant={} seed={:#x})",
        orbs.len(),
        config.orb_count,
        config.density,
        config.color_variant,
        seed
    );
    orbs
}

// A max below the floor inverts the range instead of panicking.
fn draw_opacity(rng: &mut StdRng, max_opacity: f32) -> f32 {
    if max_opacity > ORB_MIN_OPACITY {
        rng.gen_range(ORB_MIN_OPACITY..max_opacity)
    } else {
        ORB_MIN_OPACITY + rng.gen::<f32>() * (max_opacity - ORB_MIN_OPACITY)
    }
}

/// A generated field bound to the configuration it was built from.
///
/// Re-rendering with an unchanged configuration keeps the existing orbs; only a
/// configuration change (or an explicit reseed) draws a new set.
#[derive(Clone, Debug)]
pub struct AmbientField {
    config: FieldConfig,
    seed: u64,
    orbs: Vec<Orb>,
}

impl AmbientField {
    pub fn new(config: FieldConfig, seed: u64) -> Self {
        let orbs = generate_field(&config, seed);
        Self { config, seed, orbs }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn orbs(&self) -> &[Orb] {
        &self.orbs
    }

    /// Apply a (possibly unchanged) configuration. Returns true if the orbs
    /// were regenerated.
    pub fn update(&mut self, config: FieldConfig) -> bool {
        if config == self.config {
            return false;
        }
        self.config = config;
        self.orbs = generate_field(&self.config, self.seed);
        true
    }

    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.orbs = generate_field(&self.config, seed);
    }
}
