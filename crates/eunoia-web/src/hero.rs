use crate::timers::BrowserScheduler;
use eunoia_core::{HeroConfig, Typewriter, TypewriterCycler};
use web_sys as web;

pub const HERO_TYPEWRITER_ID: &str = "hero-typewriter";

/// Start the hero typewriter, writing each frame into `#hero-typewriter`.
pub fn mount(
    document: &web::Document,
    config: &HeroConfig,
    scheduler: BrowserScheduler,
) -> Option<TypewriterCycler<BrowserScheduler>> {
    let Some(el) = document.get_element_by_id(HERO_TYPEWRITER_ID) else {
        log::warn!("[hero] missing #{}", HERO_TYPEWRITER_ID);
        return None;
    };
    let machine = Typewriter::new(config.phrases.clone(), config.timing);
    log::info!("[hero] cycling {} phrases", machine.phrases().len());
    Some(TypewriterCycler::start(machine, scheduler, move |tw| {
        el.set_text_content(Some(&tw.render()));
    }))
}
