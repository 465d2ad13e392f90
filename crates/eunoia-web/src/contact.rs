use crate::dom::{by_id, set_hidden, Listener};
use eunoia_core::{ContactForm, Field, FieldErrors};
use wasm_bindgen::JsCast;
use web_sys as web;

const FIELDS: [Field; 4] = [Field::Name, Field::Email, Field::Service, Field::Message];
const SUCCESS_MESSAGE: &str = "Thank you! We'll be in touch soon.";

/// Client-side validation for `#contact-form`.
pub struct ContactWidget {
    _submit: Listener,
}

impl ContactWidget {
    pub fn mount(document: &web::Document) -> Option<Self> {
        let Some(form_el) = by_id::<web::HtmlFormElement>(document, "contact-form") else {
            log::warn!("[contact] missing #contact-form");
            return None;
        };
        let document = document.clone();
        let form_for_submit = form_el.clone();
        let submit = Listener::new(&form_el, "submit", move |ev| {
            ev.prevent_default();
            let form = read_form(&document);
            match form.validate() {
                Ok(()) => {
                    show_errors(&document, &FieldErrors::new());
                    log::info!(
                        "[contact] enquiry accepted (service: {})",
                        form.service()
                            .ok()
                            .flatten()
                            .map(|s| s.label())
                            .unwrap_or("none")
                    );
                    show_status(&document, Some(SUCCESS_MESSAGE));
                    form_for_submit.reset();
                }
                Err(errors) => {
                    log::debug!("[contact] {} invalid fields", errors.len());
                    show_status(&document, None);
                    show_errors(&document, &errors);
                }
            }
        })?;
        Some(Self { _submit: submit })
    }
}

fn field_value(document: &web::Document, field: Field) -> String {
    let Some(el) = document.get_element_by_id(field.id()) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.value()
    } else if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn read_form(document: &web::Document) -> ContactForm {
    ContactForm {
        name: field_value(document, Field::Name),
        email: field_value(document, Field::Email),
        service: field_value(document, Field::Service),
        message: field_value(document, Field::Message),
    }
}

/// Error text goes into `#<field>-error`; the input is flagged `aria-invalid`.
fn show_errors(document: &web::Document, errors: &FieldErrors) {
    for field in FIELDS {
        let message = errors.get(&field).copied();
        if let Some(el) = document.get_element_by_id(&format!("{}-error", field.id())) {
            el.set_text_content(message);
            set_hidden(&el, message.is_none());
        }
        if let Some(input) = document.get_element_by_id(field.id()) {
            let _ = input.set_attribute("aria-invalid", if message.is_some() { "true" } else { "false" });
        }
    }
}

fn show_status(document: &web::Document, text: Option<&str>) {
    if let Some(el) = document.get_element_by_id("contact-status") {
        el.set_text_content(text);
        set_hidden(&el, text.is_none());
    }
}
