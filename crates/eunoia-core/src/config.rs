use crate::error::Result;
use crate::field::{ColorVariant, Density, FieldConfig};
use crate::typewriter::TypewriterTiming;
use serde::{Deserialize, Serialize};

static BUILTIN_SITE_TOML: &str = include_str!("../site.toml");

/// Hero banner typewriter settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroConfig {
    pub phrases: Vec<String>,
    #[serde(flatten)]
    pub timing: TypewriterTiming,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            phrases: ["Clarity", "Creativity", "Compassion"]
                .into_iter()
                .map(String::from)
                .collect(),
            timing: TypewriterTiming::default(),
        }
    }
}

/// Ambient field mounted behind one page section.
///
/// - `id`: section id; the web frontend mounts into `[data-ambient-field="<id>"]`
/// - `class`: classes passed through to the field container
/// - `field`: generator configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionField {
    pub id: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub field: FieldConfig,
}

impl SectionField {
    pub fn new(id: &str, class: &str, field: FieldConfig) -> Self {
        Self {
            id: id.to_string(),
            class: class.to_string(),
            field,
        }
    }
}

/// Page-wide configuration: hero typewriter plus one field per section.
///
/// `seed` is the base seed; each section derives its own from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub sections: Vec<SectionField>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let with_count = |orb_count| FieldConfig {
            orb_count,
            ..FieldConfig::default()
        };
        Self {
            seed: 0x4555_4E4F,
            hero: HeroConfig::default(),
            sections: vec![
                SectionField::new("hero", "opacity-40", with_count(8)),
                SectionField::new("features", "opacity-20", with_count(10)),
                SectionField::new(
                    "testimonials",
                    "opacity-20",
                    FieldConfig {
                        orb_count: 12,
                        density: Density::Medium,
                        color_variant: ColorVariant::Blue,
                        ..FieldConfig::default()
                    },
                ),
                SectionField::new("ethos", "opacity-20", with_count(8)),
                SectionField::new("contact", "opacity-30", with_count(8)),
            ],
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        Ok(toml::from_str(src)?)
    }

    /// The configuration shipped with the site.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_SITE_TOML)
    }

    pub fn section(&self, id: &str) -> Option<&SectionField> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Per-section seed so sections sharing a config still differ.
    pub fn section_seed(&self, index: usize) -> u64 {
        self.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
