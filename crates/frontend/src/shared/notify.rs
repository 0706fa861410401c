//! Transient notifications (toasts).
//!
//! Request failures and save confirmations end up here. Each notice
//! dismisses itself after [`NOTICE_LIFETIME_MS`] through a
//! [`CancelableTimer`]; clicking it dismisses it early.

use std::collections::HashMap;

use contracts::shared::api::ApiError;
use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;

use super::config::NOTICE_LIFETIME_MS;
use super::timer::CancelableTimer;

/// Older notices are dropped beyond this many.
const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice--success",
            NoticeLevel::Info => "notice notice--info",
            NoticeLevel::Warning => "notice notice--warning",
            NoticeLevel::Error => "notice notice--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoticeList {
    next_id: u64,
    items: Vec<Notice>,
}

impl NoticeList {
    /// Returns the new id and the ids evicted to respect the cap.
    pub fn push(&mut self, level: NoticeLevel, message: String) -> (u64, Vec<u64>) {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, level, message });

        let overflow = self.items.len().saturating_sub(MAX_VISIBLE);
        let evicted = self.items.drain(..overflow).map(|n| n.id).collect();
        (id, evicted)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct Notifier {
    list: RwSignal<NoticeList>,
    timers: StoredValue<HashMap<u64, CancelableTimer>, LocalStorage>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(NoticeList::default()),
            timers: StoredValue::new_local(HashMap::new()),
        }
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Error => log::error!("{}", message),
            NoticeLevel::Warning => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }

        let mut pushed = (0, Vec::new());
        self.list.update(|list| pushed = list.push(level, message));
        let (id, evicted) = pushed;

        let this = *self;
        let mut timer = CancelableTimer::new();
        timer.arm(NOTICE_LIFETIME_MS, move || {
            this.list.try_update(|list| list.dismiss(id));
        });

        self.timers.update_value(|timers| {
            // Fired timers are released here, outside their own callback.
            timers.retain(|_, t| t.is_pending());
            for old in evicted {
                timers.remove(&old);
            }
            timers.insert(id, timer);
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&self, error: &ApiError) {
        self.push(NoticeLevel::Error, error.user_message());
    }

    pub fn dismiss(&self, id: u64) {
        self.timers.update_value(|timers| {
            timers.remove(&id);
        });
        self.list.update(|list| {
            list.dismiss(id);
        });
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.list.with(|list| list.items().to_vec())
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier not provided")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="notification-host" role="status" aria-live="polite">
            <For
                each=move || notifier.notices()
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.level.class() on:click=move |_| notifier.dismiss(id)>
                            <span class="notice__message">{notice.message}</span>
                            <span class="notice__close">"×"</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut list = NoticeList::default();
        let (a, _) = list.push(NoticeLevel::Info, "a".into());
        let (b, _) = list.push(NoticeLevel::Error, "b".into());
        assert!(b > a);
        assert_eq!(list.items().len(), 2);
        assert!(list.dismiss(a));
        assert!(!list.dismiss(a));
        assert_eq!(list.items()[0].message, "b");
    }

    #[test]
    fn test_oldest_evicted_beyond_cap() {
        let mut list = NoticeList::default();
        for i in 0..MAX_VISIBLE {
            let (_, evicted) = list.push(NoticeLevel::Info, i.to_string());
            assert!(evicted.is_empty());
        }
        let (_, evicted) = list.push(NoticeLevel::Info, "overflow".into());
        assert_eq!(evicted, vec![1]);
        assert_eq!(list.items().len(), MAX_VISIBLE);
        assert_eq!(list.items().last().map(|n| n.message.as_str()), Some("overflow"));
    }
}
