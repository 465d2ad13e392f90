// Host-side tests for the typewriter state machine and its scheduler-driven cycler.

use eunoia_core::{ManualScheduler, Phase, Typewriter, TypewriterCycler, TypewriterTiming};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const T: u64 = 100;
const D: u64 = 50;
const P: u64 = 2000;

fn timing() -> TypewriterTiming {
    TypewriterTiming {
        typing_speed_ms: T,
        deleting_speed_ms: D,
        delay_between_ms: P,
    }
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn starts_typing_the_first_phrase() {
    let tw = Typewriter::new(phrases(&["AB", "C"]), timing());
    assert_eq!(tw.phase(), Phase::Typing);
    assert_eq!(tw.index(), 0);
    assert_eq!(tw.text(), "");
    assert_eq!(tw.next_delay(), ms(T));
}

#[test]
fn full_typing_pass_ends_paused() {
    let mut tw = Typewriter::new(phrases(&["AB", "C"]), timing());
    tw.step();
    assert_eq!(tw.text(), "A");
    assert_eq!(tw.phase(), Phase::Typing);
    tw.step();
    assert_eq!(tw.text(), "AB");
    assert_eq!(tw.phase(), Phase::Paused);
    assert_eq!(tw.next_delay(), ms(P));
}

#[test]
fn pause_gives_way_to_deleting() {
    let mut tw = Typewriter::new(phrases(&["AB", "C"]), timing());
    tw.step();
    tw.step();
    tw.step(); // pause elapsed
    assert_eq!(tw.phase(), Phase::Deleting);
    assert_eq!(tw.text(), "AB");
    assert_eq!(tw.next_delay(), ms(D));
    tw.step();
    assert_eq!(tw.text(), "A");
    assert_eq!(tw.phase(), Phase::Deleting);
}

#[test]
fn emptied_phrase_advances_and_wraps() {
    let mut tw = Typewriter::new(phrases(&["AB", "C"]), timing());
    for _ in 0..5 {
        tw.step(); // A, AB/paused, deleting, A, ""
    }
    assert_eq!(tw.index(), 1);
    assert_eq!(tw.phase(), Phase::Typing);
    assert_eq!(tw.text(), "");
    assert_eq!(tw.target(), "C");

    tw.step(); // C / paused
    assert_eq!(tw.text(), "C");
    assert_eq!(tw.phase(), Phase::Paused);
    tw.step(); // deleting
    tw.step(); // "" -> wrap
    assert_eq!(tw.index(), 0);
    assert_eq!(tw.phase(), Phase::Typing);
}

#[test]
fn single_empty_phrase_loops_on_pause() {
    let mut tw = Typewriter::new(phrases(&[""]), timing());
    assert_eq!(tw.phase(), Phase::Paused);
    for _ in 0..4 {
        tw.step();
        assert_eq!(tw.phase(), Phase::Paused);
        assert_eq!(tw.index(), 0);
        assert_eq!(tw.text(), "");
    }
}

#[test]
fn empty_phrase_list_degrades_like_an_empty_phrase() {
    let mut tw = Typewriter::new(Vec::new(), timing());
    assert_eq!(tw.phase(), Phase::Paused);
    tw.step();
    assert_eq!(tw.index(), 0);
    assert_eq!(tw.text(), "");
}

#[test]
fn text_is_counted_in_characters() {
    let mut tw = Typewriter::new(phrases(&["héllo✨"]), timing());
    let mut seen = Vec::new();
    while tw.phase() == Phase::Typing {
        tw.step();
        seen.push(tw.text().to_string());
    }
    assert_eq!(seen, ["h", "hé", "hél", "héll", "héllo", "héllo✨"]);
}

#[test]
fn render_appends_caret() {
    let mut tw = Typewriter::new(phrases(&["Hi"]), timing());
    assert_eq!(tw.render(), "|");
    tw.step();
    assert_eq!(tw.render(), "H|");
}

#[test]
fn zero_timings_are_floored() {
    let tw = Typewriter::new(
        phrases(&["x"]),
        TypewriterTiming {
            typing_speed_ms: 0,
            deleting_speed_ms: 0,
            delay_between_ms: 0,
        },
    );
    assert!(tw.next_delay() > Duration::ZERO);
}

#[test]
fn cycler_runs_on_scheduler_time() {
    let sched = ManualScheduler::new();
    let cycler = TypewriterCycler::start(
        Typewriter::new(phrases(&["AB", "C"]), timing()),
        sched.clone(),
        |_| {},
    );
    assert_eq!(sched.pending(), 1);

    sched.advance(ms(T - 1));
    assert_eq!(cycler.text(), "");
    sched.advance(ms(1));
    assert_eq!(cycler.text(), "A");
    sched.advance(ms(T));
    assert_eq!(cycler.text(), "AB");
    assert_eq!(cycler.phase(), Phase::Paused);

    sched.advance(ms(P - 1));
    assert_eq!(cycler.phase(), Phase::Paused);
    sched.advance(ms(1));
    assert_eq!(cycler.phase(), Phase::Deleting);
    assert_eq!(cycler.text(), "AB");

    sched.advance(ms(D));
    assert_eq!(cycler.text(), "A");
    sched.advance(ms(D));
    assert_eq!(cycler.text(), "");
    assert_eq!(cycler.index(), 1);
    assert_eq!(cycler.phase(), Phase::Typing);

    // C typed, paused, deleted -> back to phrase 0
    sched.advance(ms(T + P + D));
    assert_eq!(cycler.index(), 0);
    assert_eq!(cycler.phase(), Phase::Typing);
    assert_eq!(sched.pending(), 1);
}

#[test]
fn cycler_keeps_exactly_one_timer_pending() {
    let sched = ManualScheduler::new();
    let cycler = TypewriterCycler::start(
        Typewriter::new(phrases(&["Hello", "World"]), timing()),
        sched.clone(),
        |_| {},
    );
    for _ in 0..40 {
        assert!(sched.run_next().is_some());
        assert_eq!(sched.pending(), 1);
        assert!(cycler.is_active());
    }
}

#[test]
fn observer_sees_every_state() {
    let sched = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::<(String, Phase)>::new()));
    let log_cb = log.clone();
    let _cycler = TypewriterCycler::start(
        Typewriter::new(phrases(&["AB", "C"]), timing()),
        sched.clone(),
        move |tw| log_cb.borrow_mut().push((tw.text().to_string(), tw.phase())),
    );
    sched.advance(ms(2 * T + P + 2 * D));

    let expected = vec![
        ("".to_string(), Phase::Typing),
        ("A".to_string(), Phase::Typing),
        ("AB".to_string(), Phase::Paused),
        ("AB".to_string(), Phase::Deleting),
        ("A".to_string(), Phase::Deleting),
        ("".to_string(), Phase::Typing),
    ];
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn dispose_mid_cycle_stops_all_updates() {
    let sched = ManualScheduler::new();
    let calls = Rc::new(RefCell::new(0usize));
    let calls_cb = calls.clone();
    let cycler = TypewriterCycler::start(
        Typewriter::new(phrases(&["AB", "C"]), timing()),
        sched.clone(),
        move |_| *calls_cb.borrow_mut() += 1,
    );
    sched.advance(ms(T));
    assert_eq!(cycler.text(), "A");
    let before = *calls.borrow();

    cycler.dispose();
    assert_eq!(sched.pending(), 0);
    assert!(!cycler.is_active());

    sched.advance(Duration::from_secs(60));
    assert_eq!(cycler.text(), "A");
    assert_eq!(*calls.borrow(), before);

    cycler.dispose();
    assert_eq!(sched.pending(), 0);
}

#[test]
fn dropping_the_cycler_cancels_its_timer() {
    let sched = ManualScheduler::new();
    let calls = Rc::new(RefCell::new(0usize));
    let calls_cb = calls.clone();
    {
        let _cycler = TypewriterCycler::start(
            Typewriter::new(phrases(&["AB"]), timing()),
            sched.clone(),
            move |_| *calls_cb.borrow_mut() += 1,
        );
        sched.advance(ms(T));
        assert_eq!(sched.pending(), 1);
    }
    assert_eq!(sched.pending(), 0);
    let before = *calls.borrow();
    assert_eq!(sched.advance(Duration::from_secs(10)), 0);
    assert_eq!(*calls.borrow(), before);
}

#[test]
fn dispose_during_pause_cancels_pending_transition() {
    let sched = ManualScheduler::new();
    let cycler = TypewriterCycler::start(
        Typewriter::new(phrases(&["A"]), timing()),
        sched.clone(),
        |_| {},
    );
    sched.advance(ms(T));
    assert_eq!(cycler.phase(), Phase::Paused);
    cycler.dispose();
    sched.advance(ms(P * 2));
    assert_eq!(cycler.phase(), Phase::Paused);
    assert_eq!(sched.pending(), 0);
}

#[test]
fn dispose_from_the_observer_stops_the_cycle() {
    let sched = ManualScheduler::new();
    let calls = Rc::new(RefCell::new(0usize));
    let handle: Rc<RefCell<Option<TypewriterCycler<ManualScheduler>>>> =
        Rc::new(RefCell::new(None));

    let calls_cb = calls.clone();
    let handle_cb = handle.clone();
    let cycler = TypewriterCycler::start(
        Typewriter::new(phrases(&["AB", "C"]), timing()),
        sched.clone(),
        move |_| {
            *calls_cb.borrow_mut() += 1;
            if *calls_cb.borrow() == 2 {
                if let Some(cycler) = handle_cb.borrow().as_ref() {
                    cycler.dispose();
                }
            }
        },
    );
    *handle.borrow_mut() = Some(cycler);

    sched.advance(Duration::from_secs(5));
    assert_eq!(*calls.borrow(), 2);
    assert_eq!(sched.pending(), 0);

    let cycler = handle.borrow_mut().take();
    let Some(cycler) = cycler else {
        panic!("cycler handle was emptied");
    };
    assert!(!cycler.is_active());
    assert_eq!(cycler.text(), "A");
}
