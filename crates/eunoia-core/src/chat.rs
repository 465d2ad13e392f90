//! Canned-response chat assistant.
//!
//! There is no backend: a message is classified by keyword and answered with a
//! fixed reply after a short "typing" delay.

use crate::constants::{CHAT_REPLY_DELAY_MS, CHAT_WELCOME_DELAY_MS};
use crate::scheduler::{Scheduler, TimerSlot};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

pub const WELCOME_MESSAGE: &str =
    "Hello! I'm Eunoia's virtual assistant. How can I help you today?";

/// What a visitor is asking about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Services,
    Pricing,
    Demo,
    Support,
    Fallback,
}

impl Intent {
    pub fn reply(self) -> &'static str {
        match self {
            Intent::Services => "Eunoia offers several AI services including Insight Engine, Content Creation, Decision Support, Market Analysis, Collaborative Agents, and Strategic Forecasting. Each service is customized to meet your specific business needs.",
            Intent::Pricing => "We offer flexible pricing plans tailored to your organization's size and needs. Our plans start at $99/month for startups and scale up for enterprise solutions. Would you like to speak with a sales representative for a custom quote?",
            Intent::Demo => "Great! I'd be happy to arrange a demo for you. Could you please provide your email address and company name? Alternatively, you can schedule a demo directly on our calendar at eunoia.ai/demo",
            Intent::Support => "You can reach our support team at support@eunoia.ai or call us at +1 (555) 123-4567 during business hours (9AM-6PM ET). For urgent issues, we also offer 24/7 emergency support for enterprise clients.",
            Intent::Fallback => "Thank you for your message. One of our team members will get back to you shortly. Is there anything specific about Eunoia's AI solutions you'd like to know in the meantime?",
        }
    }
}

/// Classify a message. Rules are checked in order; the first match wins.
pub fn classify(text: &str) -> Intent {
    let text = text.to_lowercase();
    if text.contains("service") {
        Intent::Services
    } else if text.contains("price") || text.contains("cost") {
        Intent::Pricing
    } else if text.contains("demo") {
        Intent::Demo
    } else if text.contains("contact") || text.contains("support") {
        Intent::Support
    } else {
        Intent::Fallback
    }
}

/// A suggested question shown before the conversation gets going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub id: &'static str,
    pub label: &'static str,
    pub message: &'static str,
}

pub const SUGGESTIONS: [Suggestion; 4] = [
    Suggestion {
        id: "services",
        label: "Tell me about your services",
        message: "Tell me about your services",
    },
    Suggestion {
        id: "pricing",
        label: "What are your pricing plans?",
        message: "What are your pricing plans?",
    },
    Suggestion {
        id: "demo",
        label: "Request a demo",
        message: "I would like to request a demo",
    },
    Suggestion {
        id: "contact",
        label: "Contact support",
        message: "How can I contact support?",
    },
];

pub fn suggestion(id: &str) -> Option<&'static Suggestion> {
    SUGGESTIONS.iter().find(|s| s.id == id)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: f64,
}

/// Conversation state as seen by the widget.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    open: bool,
    typing: bool,
    next_seq: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the assistant's typing indicator is showing.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Suggestion chips are offered until the visitor has said something.
    pub fn show_suggestions(&self) -> bool {
        self.messages.len() <= 1 && !self.typing
    }

    /// Input is locked while the assistant is typing.
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.typing
    }

    fn push(&mut self, id: String, text: &str, sender: Sender, timestamp_ms: f64) {
        self.messages.push(Message {
            id,
            text: text.to_string(),
            sender,
            timestamp_ms,
        });
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_seq += 1;
        format!("{prefix}-{}", self.next_seq)
    }
}

#[derive(Clone, Copy, Debug)]
enum Pending {
    Welcome,
    Reply(Intent),
}

struct ChatInner<S: Scheduler> {
    session: ChatSession,
    slot: TimerSlot<S>,
    clock: Box<dyn Fn() -> f64>,
    on_change: Box<dyn FnMut(&ChatSession)>,
}

impl<S: Scheduler> ChatInner<S> {
    fn notify(&mut self) {
        let ChatInner {
            session, on_change, ..
        } = self;
        on_change(&*session);
    }
}

struct ChatShared<S: Scheduler> {
    // Outside the RefCell so `on_change` can dispose mid-update.
    disposed: Cell<bool>,
    state: RefCell<ChatInner<S>>,
}

impl<S: Scheduler> ChatShared<S> {
    /// Notify the observer, then clear the slot if the observer disposed.
    fn notify(&self, inner: &mut ChatInner<S>) {
        inner.notify();
        if self.disposed.get() {
            inner.slot.clear();
        }
    }
}

/// The chat widget's behaviour: open/close, send, and delayed replies.
///
/// `clock` returns the current time in epoch milliseconds for message
/// timestamps. `on_change` runs after every state change.
pub struct ChatAssistant<S: Scheduler> {
    inner: Rc<ChatShared<S>>,
}

impl<S: Scheduler> ChatAssistant<S> {
    pub fn new(
        scheduler: S,
        clock: impl Fn() -> f64 + 'static,
        on_change: impl FnMut(&ChatSession) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(ChatShared {
                disposed: Cell::new(false),
                state: RefCell::new(ChatInner {
                    session: ChatSession::new(),
                    slot: TimerSlot::new(scheduler),
                    clock: Box::new(clock),
                    on_change: Box::new(on_change),
                }),
            }),
        }
    }

    pub fn toggle(&self) {
        let open = self.inner.state.borrow().session.open;
        self.set_open(!open);
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// Opening an empty conversation starts the welcome message.
    fn set_open(&self, open: bool) {
        if self.inner.disposed.get() {
            return;
        }
        let mut inner = self.inner.state.borrow_mut();
        if inner.session.open == open {
            return;
        }
        inner.session.open = open;
        let greet = open && inner.session.messages.is_empty() && !inner.session.typing;
        if greet {
            Self::arm(&mut inner, &self.inner, Pending::Welcome);
        }
        self.inner.notify(&mut inner);
    }

    /// Send a visitor message. Blank input, or input while the assistant is
    /// typing, is ignored. Returns the intent that will be answered.
    pub fn send(&self, text: &str) -> Option<Intent> {
        if self.inner.disposed.get() {
            return None;
        }
        let mut inner = self.inner.state.borrow_mut();
        if !inner.session.can_send(text) {
            return None;
        }
        let now = (inner.clock)();
        let id = inner.session.next_id("user");
        inner.session.push(id, text, Sender::User, now);
        let intent = classify(text);
        log::debug!("[chat] user message classified as {:?}", intent);
        Self::arm(&mut inner, &self.inner, Pending::Reply(intent));
        self.inner.notify(&mut inner);
        Some(intent)
    }

    pub fn send_suggestion(&self, id: &str) -> Option<Intent> {
        suggestion(id).and_then(|s| self.send(s.message))
    }

    /// Queue `pending` and show the typing indicator while it waits.
    fn arm(inner: &mut ChatInner<S>, rc: &Rc<ChatShared<S>>, pending: Pending) {
        let delay = match pending {
            Pending::Welcome => CHAT_WELCOME_DELAY_MS,
            Pending::Reply(_) => CHAT_REPLY_DELAY_MS,
        };
        let weak = Rc::downgrade(rc);
        inner.session.typing = inner.slot.arm(
            Duration::from_millis(delay),
            Box::new(move || Self::deliver(&weak, pending)),
        );
        if !inner.session.typing {
            log::warn!("[chat] {:?} not scheduled", pending);
        }
    }

    fn deliver(weak: &Weak<ChatShared<S>>, pending: Pending) {
        let Some(rc) = weak.upgrade() else {
            return;
        };
        if rc.disposed.get() {
            return;
        }
        let mut inner = rc.state.borrow_mut();
        let now = (inner.clock)();
        match pending {
            Pending::Welcome => {
                inner
                    .session
                    .push("welcome".to_string(), WELCOME_MESSAGE, Sender::Assistant, now);
            }
            Pending::Reply(intent) => {
                let id = inner.session.next_id("assistant");
                inner.session.push(id, intent.reply(), Sender::Assistant, now);
            }
        }
        inner.session.typing = false;
        rc.notify(&mut inner);
    }

    /// Cancel any pending reply. Idempotent.
    pub fn dispose(&self) {
        if !self.inner.disposed.replace(true) {
            log::debug!("[chat] disposed");
        }
        // While an update is running the state is borrowed; it clears the
        // slot itself once the observer returns.
        if let Ok(mut inner) = self.inner.state.try_borrow_mut() {
            inner.slot.clear();
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&ChatSession) -> R) -> R {
        f(&self.inner.state.borrow().session)
    }
}

impl<S: Scheduler> Drop for ChatAssistant<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
