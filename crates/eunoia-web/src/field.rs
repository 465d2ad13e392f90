use crate::dom::js_err;
use eunoia_core::style::{field_class, orb_style, stylesheet, ORB_CLASS, STYLESHEET_ID};
use eunoia_core::{AmbientField, SectionField, SiteConfig};
use web_sys as web;

/// The `<style>` element with the orb pulse keyframes. Dropping it removes it.
pub struct FieldStyles {
    el: web::Element,
}

impl FieldStyles {
    pub fn mount(document: &web::Document) -> anyhow::Result<Self> {
        if let Some(stale) = document.get_element_by_id(STYLESHEET_ID) {
            stale.remove();
        }
        let head = document
            .head()
            .ok_or_else(|| anyhow::anyhow!("no <head>"))?;
        let el = document.create_element("style").map_err(js_err)?;
        el.set_id(STYLESHEET_ID);
        el.set_text_content(Some(&stylesheet()));
        head.append_child(&el).map_err(js_err)?;
        Ok(Self { el })
    }
}

impl Drop for FieldStyles {
    fn drop(&mut self) {
        self.el.remove();
    }
}

/// An ambient field rendered into its section. Dropping it removes the nodes.
pub struct MountedField {
    section: String,
    container: web::Element,
    field: AmbientField,
}

impl MountedField {
    pub fn mount(
        document: &web::Document,
        host: &web::Element,
        section: &SectionField,
        seed: u64,
    ) -> anyhow::Result<Self> {
        let container = document.create_element("div").map_err(js_err)?;
        container.set_class_name(&field_class(&section.class));
        container.set_attribute("aria-hidden", "true").map_err(js_err)?;

        let field = AmbientField::new(section.field.clone(), seed);
        for orb in field.orbs() {
            let el = document.create_element("div").map_err(js_err)?;
            el.set_class_name(ORB_CLASS);
            el.set_attribute("style", &orb_style(orb)).map_err(js_err)?;
            container.append_child(&el).map_err(js_err)?;
        }
        // Behind the section content
        host.insert_before(&container, host.first_child().as_ref())
            .map_err(js_err)?;

        Ok(Self {
            section: section.id.clone(),
            container,
            field,
        })
    }

    pub fn orb_count(&self) -> usize {
        self.field.orbs().len()
    }
}

impl Drop for MountedField {
    fn drop(&mut self) {
        self.container.remove();
        log::debug!("[field] unmounted {}", self.section);
    }
}

/// Mount a field into every `[data-ambient-field="<id>"]` host the page has.
pub fn mount_all(document: &web::Document, config: &SiteConfig) -> Vec<MountedField> {
    let mut mounted = Vec::with_capacity(config.sections.len());
    for (i, section) in config.sections.iter().enumerate() {
        let selector = format!("[data-ambient-field=\"{}\"]", section.id);
        let Some(host) = document.query_selector(&selector).ok().flatten() else {
            log::debug!("[field] no host for section {}", section.id);
            continue;
        };
        match MountedField::mount(document, &host, section, config.section_seed(i)) {
            Ok(field) => {
                log::info!("[field] {}: {} orbs", section.id, field.orb_count());
                mounted.push(field);
            }
            Err(e) => log::error!("[field] {} mount error: {:?}", section.id, e),
        }
    }
    mounted
}
