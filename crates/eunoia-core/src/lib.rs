pub mod chat;
pub mod config;
pub mod constants;
pub mod contact;
pub mod error;
pub mod field;
pub mod page;
pub mod scheduler;
pub mod style;
pub mod theme;
pub mod typewriter;

pub use chat::{classify, ChatAssistant, ChatSession, Intent, Message, Sender};
pub use config::{HeroConfig, SectionField, SiteConfig};
pub use constants::*;
pub use contact::{ContactForm, Field, FieldErrors, Service};
pub use error::{Error, Result};
pub use field::{generate_field, AmbientField, ColorVariant, Density, FieldConfig, Orb, Quadrant};
pub use scheduler::{ManualScheduler, Scheduler, Task, TimerId, TimerSlot};
pub use theme::Theme;
pub use typewriter::{Phase, Typewriter, TypewriterCycler, TypewriterTiming};
