//! Status-driven polling.
//!
//! A [`PollingFetcher`] re-runs a fetch on a fixed interval while the watched
//! resource is in progress. Components feed it the latest status from an
//! `Effect`; it arms a single repeating timer when the status enters the
//! in-progress set and drops it when the status leaves, when `stop` is
//! called, or when the fetcher itself is dropped.

use super::timer::{BrowserScheduler, Scheduler};
use contracts::domain::a003_announcement::aggregate::AnnouncementStatus;

/// Status that may still change on the server without user action.
pub trait PollStatus {
    fn is_in_progress(&self) -> bool;
}

impl PollStatus for AnnouncementStatus {
    fn is_in_progress(&self) -> bool {
        AnnouncementStatus::is_in_progress(self)
    }
}

/// True if any status in the collection is still moving.
pub fn any_in_progress<'a, T, I>(statuses: I) -> bool
where
    T: PollStatus + 'a,
    I: IntoIterator<Item = &'a T>,
{
    statuses.into_iter().any(PollStatus::is_in_progress)
}

pub struct PollingFetcher<S: Scheduler = BrowserScheduler> {
    scheduler: S,
    interval_ms: u32,
    timer: Option<S::Handle>,
    label: &'static str,
}

impl PollingFetcher<BrowserScheduler> {
    pub fn new(label: &'static str, interval_ms: u32) -> Self {
        Self::with_scheduler(BrowserScheduler, label, interval_ms)
    }
}

impl<S: Scheduler> PollingFetcher<S> {
    pub fn with_scheduler(scheduler: S, label: &'static str, interval_ms: u32) -> Self {
        Self {
            scheduler,
            interval_ms,
            timer: None,
            label,
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Start polling if `in_progress` and not already polling; stop otherwise.
    ///
    /// Returns whether polling is active afterwards.
    pub fn watch(&mut self, in_progress: bool, fetch: impl FnMut() + 'static) -> bool {
        if !in_progress {
            self.stop();
        } else if !self.is_active() {
            self.start(fetch);
        }
        self.is_active()
    }

    pub fn watch_status<T: PollStatus>(&mut self, status: &T, fetch: impl FnMut() + 'static) -> bool {
        self.watch(status.is_in_progress(), fetch)
    }

    /// Begin a new poll cycle, cancelling the previous timer first.
    pub fn start(&mut self, fetch: impl FnMut() + 'static) {
        self.timer = None;
        log::debug!("polling {} every {} ms", self.label, self.interval_ms);
        self.timer = Some(self.scheduler.repeat(self.interval_ms, Box::new(fetch)));
    }

    pub fn stop(&mut self) {
        if self.timer.take().is_some() {
            log::debug!("polling {} stopped", self.label);
        }
    }
}

impl<S: Scheduler> Drop for PollingFetcher<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::timer::manual::ManualScheduler;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const INTERVAL: u32 = 5_000;

    struct Harness {
        scheduler: ManualScheduler,
        calls: Rc<Cell<u32>>,
        status: Rc<RefCell<AnnouncementStatus>>,
        fetcher: PollingFetcher<ManualScheduler>,
    }

    impl Harness {
        fn new(status: AnnouncementStatus) -> Self {
            let scheduler = ManualScheduler::new();
            Self {
                fetcher: PollingFetcher::with_scheduler(scheduler.clone(), "test", INTERVAL),
                scheduler,
                calls: Rc::new(Cell::new(0)),
                status: Rc::new(RefCell::new(status)),
            }
        }

        /// What a component effect does after every status change.
        fn sync(&mut self) -> bool {
            let calls = self.calls.clone();
            let status = *self.status.borrow();
            self.fetcher
                .watch_status(&status, move || calls.set(calls.get() + 1))
        }
    }

    #[test]
    fn test_stops_after_status_leaves_in_progress() {
        let mut h = Harness::new(AnnouncementStatus::Processing);
        assert!(h.sync());

        h.scheduler.advance(INTERVAL as u64);
        h.scheduler.advance(INTERVAL as u64);
        assert_eq!(h.calls.get(), 2);

        *h.status.borrow_mut() = AnnouncementStatus::Sent;
        assert!(!h.sync());

        h.scheduler.advance(INTERVAL as u64 * 3);
        assert_eq!(h.calls.get(), 2);
        assert_eq!(h.scheduler.live_timers(), 0);
    }

    #[test]
    fn test_terminal_status_never_polls() {
        let mut h = Harness::new(AnnouncementStatus::Failed);
        assert!(!h.sync());
        h.scheduler.advance(60_000);
        assert_eq!(h.calls.get(), 0);
    }

    #[test]
    fn test_drop_cancels_active_poll() {
        let h = {
            let mut h = Harness::new(AnnouncementStatus::Pending);
            h.sync();
            h.scheduler.advance(INTERVAL as u64);
            h
        };
        let Harness {
            scheduler,
            calls,
            fetcher,
            ..
        } = h;
        assert_eq!(calls.get(), 1);

        drop(fetcher);
        scheduler.advance(INTERVAL as u64 * 4);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_restart_does_not_overlap() {
        let mut h = Harness::new(AnnouncementStatus::Pending);
        h.sync();
        // Still in progress: the running cycle is kept.
        h.sync();
        assert_eq!(h.scheduler.live_timers(), 1);

        let calls = h.calls.clone();
        h.fetcher.start(move || calls.set(calls.get() + 1));
        assert_eq!(h.scheduler.live_timers(), 1);

        h.scheduler.advance(INTERVAL as u64);
        assert_eq!(h.calls.get(), 1);
    }

    #[test]
    fn test_any_in_progress() {
        let statuses = [AnnouncementStatus::Sent, AnnouncementStatus::Processing];
        assert!(any_in_progress(statuses.iter()));
        assert!(!any_in_progress(statuses[..1].iter()));
    }
}
