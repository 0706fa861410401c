//! Cancelable timers.
//!
//! Every timer in the UI (polling, debounced toggles, countdown ticks,
//! notification auto-dismiss) goes through a [`Scheduler`]. A scheduled
//! callback stays alive only as long as its handle: dropping the handle
//! cancels it. Components own their handles, so unmounting a component
//! releases every timer it started.

use gloo_timers::callback::{Interval, Timeout};
use std::cell::Cell;
use std::rc::Rc;

pub trait Scheduler: Clone + 'static {
    /// Dropping the handle cancels the timer.
    type Handle: 'static;

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;

    fn repeat(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle;
}

/// `setTimeout` / `setInterval` through gloo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

pub enum BrowserTimer {
    Timeout(Timeout),
    Interval(Interval),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
        BrowserTimer::Timeout(Timeout::new(delay_ms, callback))
    }

    fn repeat(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle {
        BrowserTimer::Interval(Interval::new(interval_ms, callback))
    }
}

/// A single re-armable timeout.
///
/// `arm` replaces whatever was pending; `cancel` drops it. Used for debounce.
pub struct CancelableTimer<S: Scheduler = BrowserScheduler> {
    scheduler: S,
    handle: Option<S::Handle>,
    pending: Rc<Cell<bool>>,
}

impl CancelableTimer<BrowserScheduler> {
    pub fn new() -> Self {
        Self::with_scheduler(BrowserScheduler)
    }
}

impl Default for CancelableTimer<BrowserScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> CancelableTimer<S> {
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            scheduler,
            handle: None,
            pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn arm(&mut self, delay_ms: u32, callback: impl FnOnce() + 'static) {
        self.cancel();
        let pending = Rc::new(Cell::new(true));
        let flag = pending.clone();
        self.pending = pending;
        self.handle = Some(self.scheduler.once(
            delay_ms,
            Box::new(move || {
                flag.set(false);
                callback();
            }),
        ));
    }

    pub fn cancel(&mut self) {
        self.pending.set(false);
        self.handle = None;
    }

    /// Armed and not yet fired.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

#[cfg(test)]
pub(crate) mod manual {
    //! Deterministic scheduler for unit tests: time only moves on `advance`.

    use super::Scheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    enum Task {
        Once(Box<dyn FnOnce()>),
        Repeat(u32, Box<dyn FnMut()>),
    }

    struct Entry {
        due: u64,
        seq: u64,
        cancelled: Rc<Cell<bool>>,
        task: Task,
    }

    #[derive(Default)]
    struct State {
        now: u64,
        seq: u64,
        entries: Vec<Entry>,
    }

    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        state: Rc<RefCell<State>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> u64 {
            self.state.borrow().now
        }

        /// Timers that are scheduled and not cancelled.
        pub fn live_timers(&self) -> usize {
            self.state
                .borrow()
                .entries
                .iter()
                .filter(|e| !e.cancelled.get())
                .count()
        }

        fn push(&self, delay: u32, task: Task) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            let mut state = self.state.borrow_mut();
            state.seq += 1;
            let entry = Entry {
                due: state.now + delay as u64,
                seq: state.seq,
                cancelled: cancelled.clone(),
                task,
            };
            state.entries.push(entry);
            ManualHandle { cancelled }
        }

        /// Move the clock forward, firing due callbacks in time order.
        pub fn advance(&self, ms: u64) {
            let target = self.now() + ms;
            loop {
                let next = {
                    let mut state = self.state.borrow_mut();
                    state.entries.retain(|e| !e.cancelled.get());
                    let idx = state
                        .entries
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due <= target)
                        .min_by_key(|(_, e)| (e.due, e.seq))
                        .map(|(i, _)| i);
                    match idx {
                        Some(i) => {
                            let entry = state.entries.remove(i);
                            state.now = entry.due;
                            Some(entry)
                        }
                        None => None,
                    }
                };

                let Some(entry) = next else { break };
                // The state borrow is released: callbacks may schedule or cancel.
                match entry.task {
                    Task::Once(callback) => callback(),
                    Task::Repeat(period, mut callback) => {
                        callback();
                        if !entry.cancelled.get() {
                            let mut state = self.state.borrow_mut();
                            state.seq += 1;
                            let seq = state.seq;
                            state.entries.push(Entry {
                                due: entry.due + period.max(1) as u64,
                                seq,
                                cancelled: entry.cancelled,
                                task: Task::Repeat(period, callback),
                            });
                        }
                    }
                }
            }
            self.state.borrow_mut().now = target;
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn once(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
            self.push(delay_ms, Task::Once(callback))
        }

        fn repeat(&self, interval_ms: u32, callback: Box<dyn FnMut()>) -> Self::Handle {
            self.push(interval_ms.max(1), Task::Repeat(interval_ms, callback))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::manual::ManualScheduler;
    use super::*;

    #[test]
    fn test_rearm_replaces_pending_callback() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(0));
        let mut timer = CancelableTimer::with_scheduler(scheduler.clone());

        let f = fired.clone();
        timer.arm(400, move || f.set(f.get() + 1));
        scheduler.advance(300);
        let f = fired.clone();
        timer.arm(400, move || f.set(f.get() + 10));
        scheduler.advance(300);
        assert_eq!(fired.get(), 0);
        assert!(timer.is_pending());

        scheduler.advance(100);
        assert_eq!(fired.get(), 10);
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_cancel_and_drop_release_timer() {
        let scheduler = ManualScheduler::new();
        let fired = Rc::new(Cell::new(false));

        let mut timer = CancelableTimer::with_scheduler(scheduler.clone());
        let f = fired.clone();
        timer.arm(100, move || f.set(true));
        timer.cancel();
        scheduler.advance(1_000);
        assert!(!fired.get());

        let f = fired.clone();
        timer.arm(100, move || f.set(true));
        drop(timer);
        assert_eq!(scheduler.live_timers(), 0);
        scheduler.advance(1_000);
        assert!(!fired.get());
    }

    #[test]
    fn test_manual_repeat_fires_per_interval() {
        let scheduler = ManualScheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        let handle = scheduler.repeat(1_000, Box::new(move || t.set(t.get() + 1)));
        scheduler.advance(3_500);
        assert_eq!(ticks.get(), 3);
        drop(handle);
        scheduler.advance(5_000);
        assert_eq!(ticks.get(), 3);
    }
}
