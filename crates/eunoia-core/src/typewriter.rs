use crate::constants::*;
use crate::scheduler::{Scheduler, TimerSlot};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Which character-count transformation is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Typing,
    Paused,
    Deleting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Typing => "typing",
            Phase::Paused => "paused",
            Phase::Deleting => "deleting",
        })
    }
}

/// Tick intervals for the typewriter, in milliseconds.
///
/// - `typing_speed_ms`: delay between revealed characters
/// - `deleting_speed_ms`: delay between removed characters
/// - `delay_between_ms`: how long a complete phrase stays on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterTiming {
    pub typing_speed_ms: u64,
    pub deleting_speed_ms: u64,
    pub delay_between_ms: u64,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            typing_speed_ms: TYPING_SPEED_MS,
            deleting_speed_ms: DELETING_SPEED_MS,
            delay_between_ms: DELAY_BETWEEN_MS,
        }
    }
}

impl TypewriterTiming {
    pub fn typing_speed(&self) -> Duration {
        tick(self.typing_speed_ms)
    }

    pub fn deleting_speed(&self) -> Duration {
        tick(self.deleting_speed_ms)
    }

    pub fn delay_between(&self) -> Duration {
        tick(self.delay_between_ms)
    }
}

#[inline]
fn tick(ms: u64) -> Duration {
    Duration::from_millis(ms.max(MIN_TICK_MS))
}

/// Finite-state machine that types, pauses on, deletes and cycles phrases.
///
/// The displayed text is always a prefix of the current phrase, counted in
/// Unicode scalar values. Transitions that take no time (a phrase finishing,
/// or the text emptying while deleting) are applied inside the tick that
/// caused them, so a driver only ever waits on [`next_delay`](Self::next_delay).
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    index: usize,
    shown: usize,
    phase: Phase,
}

impl Typewriter {
    /// Start typing the first phrase. An empty list behaves like a single
    /// empty phrase.
    pub fn new(phrases: Vec<String>, timing: TypewriterTiming) -> Self {
        let mut machine = Self {
            phrases,
            timing,
            index: 0,
            shown: 0,
            phase: Phase::Typing,
        };
        machine.settle();
        machine
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn timing(&self) -> &TypewriterTiming {
        &self.timing
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The phrase currently being typed or deleted.
    pub fn target(&self) -> &str {
        self.phrases.get(self.index).map(String::as_str).unwrap_or("")
    }

    /// Currently displayed prefix of [`target`](Self::target).
    pub fn text(&self) -> &str {
        let target = self.target();
        match target.char_indices().nth(self.shown) {
            Some((end, _)) => &target[..end],
            None => target,
        }
    }

    /// Display text with the caret appended.
    pub fn render(&self) -> String {
        format!("{}{}", self.text(), TYPEWRITER_CARET)
    }

    /// Time to wait before the next [`step`](Self::step).
    pub fn next_delay(&self) -> Duration {
        match self.phase {
            Phase::Typing => self.timing.typing_speed(),
            Phase::Paused => self.timing.delay_between(),
            Phase::Deleting => self.timing.deleting_speed(),
        }
    }

    /// Apply one tick.
    pub fn step(&mut self) {
        match self.phase {
            Phase::Typing => {
                if self.shown < self.target_len() {
                    self.shown += 1;
                }
            }
            Phase::Paused => {
                self.phase = Phase::Deleting;
                log::trace!("[typewriter] paused -> deleting ({})", self.index);
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
            }
        }
        self.settle();
    }

    fn target_len(&self) -> usize {
        self.target().chars().count()
    }

    // Terminates: Paused is never an instantaneous state.
    fn settle(&mut self) {
        loop {
            match self.phase {
                Phase::Typing if self.shown >= self.target_len() => {
                    self.phase = Phase::Paused;
                    log::trace!("[typewriter] typing -> paused ({})", self.index);
                }
                Phase::Deleting if self.shown == 0 => {
                    self.index = match self.phrases.len() {
                        0 => 0,
                        len => (self.index + 1) % len,
                    };
                    self.phase = Phase::Typing;
                    log::trace!("[typewriter] deleting -> typing ({})", self.index);
                }
                _ => break,
            }
        }
    }
}

struct CyclerInner<S: Scheduler> {
    machine: Typewriter,
    slot: TimerSlot<S>,
    on_change: Box<dyn FnMut(&Typewriter)>,
}

struct CyclerShared<S: Scheduler> {
    // Outside the RefCell so `on_change` can dispose mid-tick.
    disposed: Cell<bool>,
    state: RefCell<CyclerInner<S>>,
}

/// Drives a [`Typewriter`] from a [`Scheduler`], forever.
///
/// Exactly one timeout is pending at any time. Every tick notifies
/// `on_change`. Disposing (or dropping) the cycler cancels the pending
/// timeout, even from inside `on_change`; a timeout that still fires
/// afterwards does nothing.
pub struct TypewriterCycler<S: Scheduler> {
    inner: Rc<CyclerShared<S>>,
}

impl<S: Scheduler> TypewriterCycler<S> {
    /// Notify `on_change` with the initial state and arm the first tick.
    pub fn start(
        machine: Typewriter,
        scheduler: S,
        on_change: impl FnMut(&Typewriter) + 'static,
    ) -> Self {
        let inner = Rc::new(CyclerShared {
            disposed: Cell::new(false),
            state: RefCell::new(CyclerInner {
                machine,
                slot: TimerSlot::new(scheduler),
                on_change: Box::new(on_change),
            }),
        });
        {
            let mut guard = inner.state.borrow_mut();
            let CyclerInner {
                machine, on_change, ..
            } = &mut *guard;
            on_change(&*machine);
        }
        Self::arm(&inner);
        Self { inner }
    }

    fn arm(inner: &Rc<CyclerShared<S>>) {
        let mut guard = inner.state.borrow_mut();
        if inner.disposed.get() {
            guard.slot.clear();
            return;
        }
        let weak = Rc::downgrade(inner);
        let delay = guard.machine.next_delay();
        if !guard.slot.arm(delay, Box::new(move || Self::fire(&weak))) {
            log::warn!("[typewriter] next tick not scheduled; cycler stopped");
        }
    }

    fn fire(weak: &Weak<CyclerShared<S>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        if inner.disposed.get() {
            return;
        }
        {
            let mut guard = inner.state.borrow_mut();
            let CyclerInner {
                machine, on_change, ..
            } = &mut *guard;
            machine.step();
            on_change(&*machine);
        }
        Self::arm(&inner);
    }

    /// Cancel the pending tick. Idempotent.
    pub fn dispose(&self) {
        if !self.inner.disposed.replace(true) {
            log::debug!("[typewriter] disposed");
        }
        // While a tick is running the slot is borrowed; `arm` clears it instead.
        if let Ok(mut guard) = self.inner.state.try_borrow_mut() {
            guard.slot.clear();
        }
    }

    pub fn is_active(&self) -> bool {
        !self.inner.disposed.get() && self.inner.state.borrow().slot.is_armed()
    }

    /// Inspect the current machine state.
    pub fn with<R>(&self, f: impl FnOnce(&Typewriter) -> R) -> R {
        f(&self.inner.state.borrow().machine)
    }

    pub fn text(&self) -> String {
        self.with(|m| m.text().to_string())
    }

    pub fn phase(&self) -> Phase {
        self.with(Typewriter::phase)
    }

    pub fn index(&self) -> usize {
        self.with(Typewriter::index)
    }
}

impl<S: Scheduler> Drop for TypewriterCycler<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
