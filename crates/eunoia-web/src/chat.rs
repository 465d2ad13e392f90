use crate::dom::{add_click_listener, by_id, event_closest, js_err, set_class, set_hidden, Listener};
use crate::timers::BrowserScheduler;
use eunoia_core::chat::SUGGESTIONS;
use eunoia_core::{ChatAssistant, ChatSession, Sender, TimerSlot, CHAT_FOCUS_DELAY_MS};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys as web;

/// DOM handles the chat widget renders into.
#[derive(Clone)]
struct ChatElements {
    toggle: web::Element,
    panel: web::Element,
    messages: web::Element,
    typing: web::Element,
    suggestions: web::Element,
    form: web::HtmlFormElement,
    input: web::HtmlInputElement,
    send: Option<web::HtmlButtonElement>,
}

impl ChatElements {
    fn find(document: &web::Document) -> Option<Self> {
        Some(Self {
            toggle: document.get_element_by_id("chat-toggle")?,
            panel: document.get_element_by_id("chat-panel")?,
            messages: document.get_element_by_id("chat-messages")?,
            typing: document.get_element_by_id("chat-typing")?,
            suggestions: document.get_element_by_id("chat-suggestions")?,
            form: by_id(document, "chat-form")?,
            input: by_id(document, "chat-input")?,
            send: by_id(document, "chat-send"),
        })
    }
}

/// The floating chat widget: an assistant plus its listeners.
pub struct ChatWidget {
    _listeners: Vec<Listener>,
    assistant: Rc<ChatAssistant<BrowserScheduler>>,
    focus: Rc<RefCell<TimerSlot<BrowserScheduler>>>,
}

impl ChatWidget {
    pub fn mount(document: &web::Document, scheduler: BrowserScheduler) -> Option<Self> {
        let Some(els) = ChatElements::find(document) else {
            log::warn!("[chat] widget markup missing; chat disabled");
            return None;
        };
        if let Err(e) = render_suggestions(document, &els.suggestions) {
            log::error!("[chat] suggestions: {:?}", e);
        }

        let focus = Rc::new(RefCell::new(TimerSlot::new(scheduler.clone())));
        let assistant = {
            let els = els.clone();
            let document = document.clone();
            let focus = focus.clone();
            let mut was_open = false;
            Rc::new(ChatAssistant::new(
                scheduler,
                js_sys::Date::now,
                move |session: &ChatSession| {
                    if let Err(e) = render(&document, &els, session) {
                        log::error!("[chat] render: {:?}", e);
                    }
                    if session.is_open() && !was_open {
                        let input = els.input.clone();
                        focus.borrow_mut().arm(
                            Duration::from_millis(CHAT_FOCUS_DELAY_MS),
                            Box::new(move || {
                                let _ = input.focus();
                            }),
                        );
                    }
                    was_open = session.is_open();
                },
            ))
        };

        let mut listeners = Vec::new();
        {
            let assistant = assistant.clone();
            listeners.extend(add_click_listener(document, "chat-toggle", move || {
                assistant.toggle()
            }));
        }
        {
            let assistant = assistant.clone();
            listeners.extend(add_click_listener(document, "chat-close", move || {
                assistant.close()
            }));
        }
        {
            let assistant = assistant.clone();
            let input = els.input.clone();
            listeners.extend(Listener::new(&els.form, "submit", move |ev| {
                ev.prevent_default();
                if assistant.send(&input.value()).is_some() {
                    input.set_value("");
                }
            }));
        }
        {
            let assistant = assistant.clone();
            listeners.extend(Listener::new(&els.suggestions, "click", move |ev| {
                let id = event_closest(&ev, "[data-suggestion]")
                    .and_then(|el| el.get_attribute("data-suggestion"));
                if let Some(id) = id {
                    assistant.send_suggestion(&id);
                }
            }));
        }
        if let Some(send) = els.send.clone() {
            let assistant = assistant.clone();
            let input = els.input.clone();
            listeners.extend(Listener::new(&els.input, "input", move |_| {
                let value = input.value();
                send.set_disabled(!assistant.with(|s| s.can_send(&value)));
            }));
        }

        assistant.with(|s| render(document, &els, s)).ok();
        log::info!("[chat] mounted");
        Some(Self {
            _listeners: listeners,
            assistant,
            focus,
        })
    }

    pub fn dispose(&self) {
        self.assistant.dispose();
        self.focus.borrow_mut().clear();
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn render_suggestions(document: &web::Document, host: &web::Element) -> Result<(), JsValue> {
    host.set_inner_html("");
    for s in SUGGESTIONS.iter() {
        let button = document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("data-suggestion", s.id)?;
        button.set_class_name("chat-suggestion");
        button.set_text_content(Some(s.label));
        host.append_child(&button)?;
    }
    Ok(())
}

fn render(
    document: &web::Document,
    els: &ChatElements,
    session: &ChatSession,
) -> anyhow::Result<()> {
    set_hidden(&els.panel, !session.is_open());
    els.toggle
        .set_attribute("aria-expanded", if session.is_open() { "true" } else { "false" })
        .map_err(js_err)?;

    els.messages.set_inner_html("");
    for message in session.messages() {
        let bubble = document.create_element("div").map_err(js_err)?;
        bubble.set_class_name("chat-message");
        set_class(&bubble, "chat-message--user", message.sender == Sender::User);
        set_class(
            &bubble,
            "chat-message--assistant",
            message.sender == Sender::Assistant,
        );
        bubble.set_attribute("data-id", &message.id).map_err(js_err)?;

        let text = document.create_element("p").map_err(js_err)?;
        text.set_text_content(Some(&message.text));
        let time = document.create_element("div").map_err(js_err)?;
        time.set_class_name("chat-time");
        time.set_text_content(Some(&format_time(message.timestamp_ms)));

        bubble.append_child(&text).map_err(js_err)?;
        bubble.append_child(&time).map_err(js_err)?;
        els.messages.append_child(&bubble).map_err(js_err)?;
    }
    els.messages.set_scroll_top(els.messages.scroll_height());

    set_hidden(&els.typing, !session.is_typing());
    set_hidden(&els.suggestions, !session.show_suggestions());
    els.input.set_disabled(session.is_typing());
    if let Some(send) = &els.send {
        send.set_disabled(!session.can_send(&els.input.value()));
    }
    Ok(())
}

fn format_time(timestamp_ms: f64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(timestamp_ms));
    format!("{:02}:{:02}", date.get_hours(), date.get_minutes())
}
