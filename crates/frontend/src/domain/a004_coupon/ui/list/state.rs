use chrono::Utc;
use contracts::domain::a004_coupon::aggregate::CouponDto;
use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::shared::config::DEFAULT_PAGE_SIZE;
use crate::shared::date_utils::format_datetime_opt;
use crate::shared::list_utils::{sort_list, SortState, Sortable};
use crate::shared::pagination::FilterState;
use crate::shared::timer::{BrowserScheduler, CancelableTimer, Scheduler};

pub const SEARCH: &str = "search";
pub const ACTIVE: &str = "active";

#[derive(Clone, Debug)]
pub struct CouponsListState {
    pub items: Vec<CouponDto>,
    pub filters: FilterState,
    pub sort: SortState,
    pub is_loaded: bool,
}

impl Default for CouponsListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filters: FilterState::new(DEFAULT_PAGE_SIZE),
            sort: SortState::new("code"),
            is_loaded: false,
        }
    }
}

impl CouponsListState {
    pub fn sorted_items(&self) -> Vec<CouponDto> {
        let mut items = self.items.clone();
        sort_list(&mut items, &self.sort.field, self.sort.ascending);
        items
    }

    pub fn set_active(&mut self, id: &str, active: bool) {
        if let Some(c) = self.items.iter_mut().find(|c| c.id == id) {
            c.active = active;
        }
    }

    pub fn replace(&mut self, coupon: CouponDto) {
        if let Some(c) = self.items.iter_mut().find(|c| c.id == coupon.id) {
            *c = coupon;
        }
    }
}

pub fn create_state() -> RwSignal<CouponsListState> {
    RwSignal::new(CouponsListState::default())
}

impl Sortable for CouponDto {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "amount" => self
                .amount
                .partial_cmp(&other.amount)
                .unwrap_or(Ordering::Equal),
            "used" => self.used_count.cmp(&other.used_count),
            "valid_until" => self.valid_until.cmp(&other.valid_until),
            "active" => self.active.cmp(&other.active),
            _ => self.code.cmp(&other.code),
        }
    }
}

/// Badge text for a coupon's effective state.
pub fn availability_label(coupon: &CouponDto) -> &'static str {
    let now = Utc::now();
    if !coupon.active {
        "Inactive"
    } else if coupon.is_expired(now) {
        "Expired"
    } else if coupon.is_exhausted() {
        "Used up"
    } else if coupon.is_redeemable(now) {
        "Redeemable"
    } else {
        "Not started"
    }
}

/// Display values of one table row, owned so each cell can take its own.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponRow {
    pub code: String,
    pub discount: String,
    pub usage: String,
    pub valid_from: String,
    pub valid_until: String,
    pub availability: &'static str,
    pub active: bool,
}

impl From<&CouponDto> for CouponRow {
    fn from(c: &CouponDto) -> Self {
        Self {
            code: c.code.clone(),
            discount: c.display_value(),
            usage: c.usage_label(),
            valid_from: format_datetime_opt(c.valid_from.as_ref()),
            valid_until: format_datetime_opt(c.valid_until.as_ref()),
            availability: availability_label(c),
            active: c.active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ToggleEntry {
    confirmed: bool,
    desired: bool,
    in_flight: bool,
}

/// Server answer to a toggle request, merged with newer user flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleSettled {
    /// Value the row shows now.
    pub shown: bool,
    /// The user flipped again while the request was out; send another one.
    pub resend: bool,
}

/// Optimistic `active` flags waiting for the debounced toggle request.
///
/// The toggle endpoint flips the flag, so a request is only sent when the
/// value the user settled on differs from the last value the server
/// confirmed, and never while another request for the same coupon is out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleTracker {
    entries: HashMap<String, ToggleEntry>,
}

impl ToggleTracker {
    /// Flip the shown value of `id`; `shown` is what the row displays now.
    /// Returns the new value to show.
    pub fn flip(&mut self, id: &str, shown: bool) -> bool {
        let entry = self
            .entries
            .entry(id.to_string())
            .or_insert(ToggleEntry {
                confirmed: shown,
                desired: shown,
                in_flight: false,
            });
        entry.desired = !entry.desired;
        entry.desired
    }

    /// The debounce elapsed. `true` if a toggle request must go out now.
    pub fn due(&mut self, id: &str) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        if entry.in_flight {
            // `confirm` decides once the running request returns.
            return false;
        }
        if entry.desired == entry.confirmed {
            self.entries.remove(id);
            return false;
        }
        entry.in_flight = true;
        true
    }

    /// The server answered with `active`.
    pub fn confirm(&mut self, id: &str, active: bool) -> ToggleSettled {
        let Some(entry) = self.entries.get_mut(id) else {
            return ToggleSettled {
                shown: active,
                resend: false,
            };
        };
        entry.confirmed = active;
        if entry.desired == active {
            self.entries.remove(id);
            return ToggleSettled {
                shown: active,
                resend: false,
            };
        }
        ToggleSettled {
            shown: entry.desired,
            resend: true,
        }
    }

    /// The request failed. Returns the last confirmed value to roll back to.
    pub fn rollback(&mut self, id: &str) -> Option<bool> {
        self.entries.remove(id).map(|e| e.confirmed)
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

/// One debounce timer per key; re-arming a key restarts its delay.
pub struct KeyedDebounce<S: Scheduler = BrowserScheduler> {
    scheduler: S,
    timers: HashMap<String, CancelableTimer<S>>,
}

impl KeyedDebounce<BrowserScheduler> {
    pub fn new() -> Self {
        Self::with_scheduler(BrowserScheduler)
    }
}

impl Default for KeyedDebounce<BrowserScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> KeyedDebounce<S> {
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            scheduler,
            timers: HashMap::new(),
        }
    }

    pub fn schedule(&mut self, key: &str, delay_ms: u32, callback: impl FnOnce() + 'static) {
        self.timers.retain(|_, t| t.is_pending());
        let scheduler = self.scheduler.clone();
        self.timers
            .entry(key.to_string())
            .or_insert_with(|| CancelableTimer::with_scheduler(scheduler))
            .arm(delay_ms, callback);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::timer::manual::ManualScheduler;
    use contracts::domain::a004_coupon::aggregate::DiscountType;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn coupon(id: &str, code: &str, amount: f64, active: bool) -> CouponDto {
        CouponDto {
            id: id.to_string(),
            code: code.to_string(),
            discount_type: DiscountType::Percent,
            amount,
            max_uses: None,
            used_count: 0,
            valid_from: None,
            valid_until: None,
            active,
        }
    }

    #[test]
    fn test_row_values() {
        let mut c = coupon("c1", "SPRING-10", 10.0, true);
        c.max_uses = Some(50);
        c.used_count = 50;
        let row = CouponRow::from(&c);
        assert_eq!(row.code, "SPRING-10");
        assert_eq!(row.discount, "10%");
        assert_eq!(row.usage, "50 / 50");
        assert_eq!(row.valid_from, "—");
        assert_eq!(row.availability, "Used up");
        assert!(row.active);

        let row = CouponRow::from(&coupon("c2", "OFF", 5.0, false));
        assert_eq!(row.availability, "Inactive");
        assert!(!row.active);
    }

    #[test]
    fn test_double_flip_sends_nothing() {
        let mut tracker = ToggleTracker::default();
        assert!(!tracker.flip("c1", true));
        assert!(tracker.flip("c1", false));
        assert!(!tracker.due("c1"));
        assert!(!tracker.is_pending("c1"));
    }

    #[test]
    fn test_confirmed_toggle_clears_entry() {
        let mut tracker = ToggleTracker::default();
        tracker.flip("c1", true);
        assert!(tracker.due("c1"));
        assert_eq!(
            tracker.confirm("c1", false),
            ToggleSettled {
                shown: false,
                resend: false
            }
        );
        assert!(!tracker.is_pending("c1"));
    }

    #[test]
    fn test_flip_while_in_flight_resends_after_answer() {
        let mut tracker = ToggleTracker::default();
        tracker.flip("c1", true);
        assert!(tracker.due("c1"));

        // User flips back before the response arrives; its debounce waits.
        assert!(tracker.flip("c1", false));
        assert!(!tracker.due("c1"));

        let settled = tracker.confirm("c1", false);
        assert_eq!(
            settled,
            ToggleSettled {
                shown: true,
                resend: true
            }
        );
        assert!(tracker.is_pending("c1"));
        assert_eq!(
            tracker.confirm("c1", true),
            ToggleSettled {
                shown: true,
                resend: false
            }
        );
        assert!(!tracker.is_pending("c1"));
    }

    #[test]
    fn test_rollback_restores_confirmed_value() {
        let mut tracker = ToggleTracker::default();
        tracker.flip("c1", true);
        assert_eq!(tracker.rollback("c1"), Some(true));
        assert_eq!(tracker.rollback("c1"), None);
    }

    #[test]
    fn test_rapid_toggles_fire_once_after_quiet_period() {
        let scheduler = ManualScheduler::new();
        let mut debounce = KeyedDebounce::with_scheduler(scheduler.clone());
        let fired = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            if i > 0 {
                scheduler.advance(100);
            }
            let log = fired.clone();
            debounce.schedule("c1", 400, move || log.borrow_mut().push("c1"));
        }
        let log = fired.clone();
        debounce.schedule("c2", 400, move || log.borrow_mut().push("c2"));

        scheduler.advance(399);
        assert!(fired.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*fired.borrow(), vec!["c1", "c2"]);
    }

    #[test]
    fn test_cancel_all_drops_pending_toggles() {
        let scheduler = ManualScheduler::new();
        let mut debounce = KeyedDebounce::with_scheduler(scheduler.clone());
        let fired = Rc::new(RefCell::new(0));
        let count = fired.clone();
        debounce.schedule("c1", 400, move || *count.borrow_mut() += 1);

        debounce.cancel_all();
        scheduler.advance(1_000);
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn test_local_active_update_and_sort() {
        let mut state = CouponsListState::default();
        state.items = vec![coupon("1", "SPRING", 15.0, true), coupon("2", "EARLY", 5.0, true)];
        state.set_active("2", false);
        assert!(!state.items[1].active);

        assert_eq!(state.sorted_items()[0].code, "EARLY");
        state.sort.toggle("amount");
        state.sort.toggle("amount");
        assert_eq!(state.sorted_items()[0].code, "SPRING");
    }
}
