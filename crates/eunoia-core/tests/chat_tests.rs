// Host-side tests for the chat assistant: classification, delays and teardown.

use eunoia_core::chat::{suggestion, WELCOME_MESSAGE, SUGGESTIONS};
use eunoia_core::{
    classify, ChatAssistant, Intent, ManualScheduler, Sender, CHAT_REPLY_DELAY_MS,
    CHAT_WELCOME_DELAY_MS,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn assistant(sched: &ManualScheduler) -> (ChatAssistant<ManualScheduler>, Rc<RefCell<usize>>) {
    let clock_sched = sched.clone();
    let updates = Rc::new(RefCell::new(0usize));
    let updates_cb = updates.clone();
    let chat = ChatAssistant::new(
        sched.clone(),
        move || clock_sched.now().as_millis() as f64,
        move |_| *updates_cb.borrow_mut() += 1,
    );
    (chat, updates)
}

#[test]
fn classification_follows_rule_order() {
    assert_eq!(classify("Tell me about your services"), Intent::Services);
    assert_eq!(classify("What does it COST?"), Intent::Pricing);
    assert_eq!(classify("pricing plans"), Intent::Pricing);
    assert_eq!(classify("Can I get a demo"), Intent::Demo);
    assert_eq!(classify("How do I contact you"), Intent::Support);
    assert_eq!(classify("need support"), Intent::Support);
    assert_eq!(classify("hello there"), Intent::Fallback);
    // "service" outranks "price"
    assert_eq!(classify("service price"), Intent::Services);
    // "demo" outranks "support"
    assert_eq!(classify("demo support"), Intent::Demo);
}

#[test]
fn suggestions_classify_to_their_topic() {
    let expected = [
        Intent::Services,
        Intent::Pricing,
        Intent::Demo,
        Intent::Support,
    ];
    for (s, intent) in SUGGESTIONS.iter().zip(expected) {
        assert_eq!(classify(s.message), intent, "suggestion {}", s.id);
    }
    assert!(suggestion("pricing").is_some());
    assert!(suggestion("nope").is_none());
}

#[test]
fn opening_greets_after_delay() {
    let sched = ManualScheduler::new();
    let (chat, _) = assistant(&sched);
    chat.open();
    assert!(chat.with(|s| s.is_open() && s.is_typing()));
    assert!(chat.with(|s| s.messages().is_empty()));

    sched.advance(ms(CHAT_WELCOME_DELAY_MS - 1));
    assert!(chat.with(|s| s.messages().is_empty()));
    sched.advance(ms(1));
    chat.with(|s| {
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].id, "welcome");
        assert_eq!(s.messages()[0].text, WELCOME_MESSAGE);
        assert_eq!(s.messages()[0].sender, Sender::Assistant);
        assert!(!s.is_typing());
        assert!(s.show_suggestions());
    });
}

#[test]
fn reopening_does_not_greet_twice() {
    let sched = ManualScheduler::new();
    let (chat, _) = assistant(&sched);
    chat.toggle();
    sched.advance(ms(CHAT_WELCOME_DELAY_MS));
    chat.toggle();
    assert!(!chat.with(|s| s.is_open()));
    chat.toggle();
    assert_eq!(sched.pending(), 0);
    sched.advance(ms(5000));
    assert_eq!(chat.with(|s| s.messages().len()), 1);
}

#[test]
fn reply_arrives_after_typing_delay() {
    let sched = ManualScheduler::new();
    let (chat, _) = assistant(&sched);
    chat.open();
    sched.advance(ms(CHAT_WELCOME_DELAY_MS));

    assert_eq!(chat.send("How much does it cost?"), Some(Intent::Pricing));
    chat.with(|s| {
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.messages()[1].sender, Sender::User);
        assert_eq!(s.messages()[1].id, "user-1");
        assert!(s.is_typing());
        assert!(!s.show_suggestions());
    });

    sched.advance(ms(CHAT_REPLY_DELAY_MS - 1));
    assert_eq!(chat.with(|s| s.messages().len()), 2);
    sched.advance(ms(1));
    chat.with(|s| {
        let last = s.messages().last().expect("reply");
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.text, Intent::Pricing.reply());
        assert_eq!(last.id, "assistant-2");
        assert!(!s.is_typing());
    });
}

#[test]
fn timestamps_come_from_the_clock() {
    let sched = ManualScheduler::new();
    let (chat, _) = assistant(&sched);
    chat.open();
    sched.advance(ms(CHAT_WELCOME_DELAY_MS));
    chat.send("demo please");
    sched.advance(ms(CHAT_REPLY_DELAY_MS));
    chat.with(|s| {
        let stamps: Vec<f64> = s.messages().iter().map(|m| m.timestamp_ms).collect();
        let welcome = CHAT_WELCOME_DELAY_MS as f64;
        let reply = (CHAT_WELCOME_DELAY_MS + CHAT_REPLY_DELAY_MS) as f64;
        assert_eq!(stamps, vec![welcome, welcome, reply]);
    });
}

#[test]
fn blank_input_and_input_while_typing_are_ignored() {
    let sched = ManualScheduler::new();
    let (chat, _) = assistant(&sched);
    chat.open();
    sched.advance(ms(CHAT_WELCOME_DELAY_MS));

    assert_eq!(chat.send("   "), None);
    assert_eq!(chat.with(|s| s.messages().len()), 1);

    assert!(chat.send("first").is_some());
    assert_eq!(chat.send("second"), None);
    assert_eq!(chat.with(|s| s.messages().len()), 2);
    assert_eq!(sched.pending(), 1);
}

#[test]
fn suggestion_sends_its_message() {
    let sched = ManualScheduler::new();
    let (chat, _) = assistant(&sched);
    chat.open();
    sched.advance(ms(CHAT_WELCOME_DELAY_MS));
    assert_eq!(chat.send_suggestion("demo"), Some(Intent::Demo));
    assert_eq!(
        chat.with(|s| s.messages()[1].text.clone()),
        "I would like to request a demo"
    );
    assert_eq!(chat.send_suggestion("unknown"), None);
}

#[test]
fn observer_runs_on_every_change() {
    let sched = ManualScheduler::new();
    let (chat, updates) = assistant(&sched);
    chat.open(); // open + typing
    sched.advance(ms(CHAT_WELCOME_DELAY_MS)); // welcome
    chat.send("hi"); // user message
    sched.advance(ms(CHAT_REPLY_DELAY_MS)); // reply
    chat.close();
    assert_eq!(*updates.borrow(), 5);
}

#[test]
fn dispose_cancels_pending_reply() {
    let sched = ManualScheduler::new();
    let (chat, updates) = assistant(&sched);
    chat.open();
    sched.advance(ms(CHAT_WELCOME_DELAY_MS));
    chat.send("services?");
    let before = *updates.borrow();

    chat.dispose();
    assert_eq!(sched.pending(), 0);
    sched.advance(ms(10_000));
    assert_eq!(chat.with(|s| s.messages().len()), 2);
    assert_eq!(*updates.borrow(), before);
    assert_eq!(chat.send("again"), None);
}

#[test]
fn dropping_the_assistant_cancels_pending_welcome() {
    let sched = ManualScheduler::new();
    {
        let (chat, _) = assistant(&sched);
        chat.open();
        assert_eq!(sched.pending(), 1);
    }
    assert_eq!(sched.pending(), 0);
    assert_eq!(sched.advance(ms(10_000)), 0);
}

#[test]
fn dispose_from_the_observer_cancels_the_welcome() {
    let sched = ManualScheduler::new();
    let handle: Rc<RefCell<Option<ChatAssistant<ManualScheduler>>>> =
        Rc::new(RefCell::new(None));
    let handle_cb = handle.clone();
    let chat = ChatAssistant::new(sched.clone(), || 0.0, move |session| {
        if session.is_open() {
            if let Some(chat) = handle_cb.borrow().as_ref() {
                chat.dispose();
            }
        }
    });
    *handle.borrow_mut() = Some(chat);

    if let Some(chat) = handle.borrow().as_ref() {
        chat.open();
    }
    assert_eq!(sched.pending(), 0);
    sched.advance(ms(CHAT_WELCOME_DELAY_MS * 2));

    let chat = handle.borrow_mut().take();
    let Some(chat) = chat else {
        panic!("assistant handle was emptied");
    };
    assert!(chat.with(|s| s.messages().is_empty()));
    assert_eq!(chat.send("hello"), None);
}
