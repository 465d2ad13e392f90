//! Timer abstraction shared by animated components.
//!
//! Components never touch a global timer API. Each one owns a [`TimerSlot`]
//! holding at most one pending timeout, which is cancelled when it is re-armed
//! or dropped. The web frontend backs [`Scheduler`] with `setTimeout`; tests
//! and the native preview use [`ManualScheduler`], a virtual clock.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

/// Deferred work passed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + 'static>;

/// A source of one-shot timeouts.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    /// Run `task` once after `delay`. `None` means the timeout could not be
    /// queued and `task` will never run.
    fn schedule(&self, delay: Duration, task: Task) -> Option<Self::Handle>;

    /// Cancel a pending timeout. Cancelling one that already fired is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Owner of a component's single pending timeout.
pub struct TimerSlot<S: Scheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> TimerSlot<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Schedule `task`, cancelling whatever was pending before. Returns
    /// whether the new timeout was queued.
    pub fn arm(&mut self, delay: Duration, task: Task) -> bool {
        self.clear();
        self.pending = self.scheduler.schedule(delay, task);
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: Scheduler> Drop for TimerSlot<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Identifier of a timeout queued on a [`ManualScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Default)]
struct Queue {
    now: Duration,
    next_id: u64,
    // (due, id) orders by due time, then by scheduling order
    tasks: BTreeMap<(Duration, u64), Task>,
}

/// Virtual-clock scheduler. Time only moves when [`advance`](Self::advance) or
/// [`advance_to`](Self::advance_to) is called; due tasks then run in order.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<Queue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Number of timeouts still waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Due time of the earliest pending timeout.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.borrow().tasks.keys().next().map(|(due, _)| *due)
    }

    /// Move the clock forward by `by`, running every task that falls due.
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Move the clock to `target`, running due tasks one at a time. Tasks may
    /// schedule further tasks; those run too if they fall due before `target`.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut ran = 0;
        loop {
            let task = {
                let mut q = self.queue.borrow_mut();
                let key = match q.tasks.keys().next() {
                    Some(&key) if key.0 <= target => key,
                    _ => break,
                };
                q.now = q.now.max(key.0);
                q.tasks.remove(&key)
            };
            // Queue borrow is released before the task runs.
            if let Some(task) = task {
                task();
                ran += 1;
            }
        }
        let mut q = self.queue.borrow_mut();
        q.now = q.now.max(target);
        ran
    }

    /// Run the earliest pending task, jumping the clock to its due time.
    pub fn run_next(&self) -> Option<Duration> {
        let due = self.next_due()?;
        self.advance_to(due);
        Some(due)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Task) -> Option<TimerId> {
        let mut q = self.queue.borrow_mut();
        let id = q.next_id;
        q.next_id += 1;
        let due = q.now + delay;
        q.tasks.insert((due, id), task);
        Some(TimerId(id))
    }

    fn cancel(&self, handle: TimerId) {
        self.queue
            .borrow_mut()
            .tasks
            .retain(|&(_, id), _| id != handle.0);
    }
}
