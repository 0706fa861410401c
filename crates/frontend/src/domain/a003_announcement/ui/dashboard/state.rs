use contracts::domain::a003_announcement::aggregate::{AnnouncementDto, AnnouncementStatus};
use contracts::domain::a003_announcement::stats::{
    AnnouncementLimits, AnnouncementStats, AntiSpamLevel, AntiSpamStatus,
};
use contracts::shared::api::{ApiError, ApiResult};
use contracts::shared::pagination::Paginated;
use leptos::prelude::*;

use crate::shared::config::DEFAULT_PAGE_SIZE;
use crate::shared::pagination::FilterState;
use crate::shared::polling::any_in_progress;

pub const STATUS: &str = "status";

#[derive(Clone, Debug)]
pub struct DashboardState {
    pub items: Vec<AnnouncementDto>,
    pub filters: FilterState,
    pub stats: Option<AnnouncementStats>,
    pub limits: Option<AnnouncementLimits>,
    pub anti_spam: Option<AntiSpamStatus>,
    pub is_loaded: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filters: FilterState::new(DEFAULT_PAGE_SIZE),
            stats: None,
            limits: None,
            anti_spam: None,
            is_loaded: false,
        }
    }
}

/// Outcome of one dashboard refresh.
#[derive(Debug, Default, PartialEq)]
pub struct RefreshOutcome {
    /// First error among the three fetches, if any.
    pub error: Option<ApiError>,
    /// The requested page no longer exists; fetch again with the clamped page.
    pub refetch: bool,
}

impl DashboardState {
    /// Merge the joined stats/limits/list results. A failed part keeps its
    /// previous value so one slow endpoint does not blank the dashboard.
    pub fn apply_refresh(
        &mut self,
        stats: ApiResult<AnnouncementStats>,
        limits: ApiResult<AnnouncementLimits>,
        list: ApiResult<Paginated<AnnouncementDto>>,
    ) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();
        match list {
            Ok(page) => {
                let (items, stale) = self.filters.apply_response(page);
                self.items = items;
                self.is_loaded = true;
                outcome.refetch = stale;
            }
            Err(e) => outcome.error = Some(e),
        }
        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => {
                outcome.error.get_or_insert(e);
            }
        }
        match limits {
            Ok(limits) => self.limits = Some(limits),
            Err(e) => {
                outcome.error.get_or_insert(e);
            }
        }
        outcome
    }

    /// Something on the current page is still being delivered.
    pub fn needs_polling(&self) -> bool {
        any_in_progress(self.items.iter().map(|a| &a.status))
    }

    pub fn can_send(&self) -> bool {
        self.limits.map(|l| l.can_send()).unwrap_or(true)
            && self
                .anti_spam
                .as_ref()
                .map(|s| s.level != AntiSpamLevel::Blocked)
                .unwrap_or(true)
    }

    pub fn quota_summary(&self) -> Option<String> {
        self.limits.map(|l| {
            format!(
                "{} of {} sent today, {} left this month",
                l.daily_used,
                l.daily_limit,
                l.remaining_this_month()
            )
        })
    }
}

/// Queued or sending announcements cannot be withdrawn.
pub fn can_delete(announcement: &AnnouncementDto) -> bool {
    !announcement.status.is_in_progress() && announcement.status != AnnouncementStatus::Sent
}

pub fn create_state() -> RwSignal<DashboardState> {
    RwSignal::new(DashboardState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a003_announcement::aggregate::Audience;
    use contracts::shared::api::ErrorKind;
    use contracts::shared::pagination::PaginationState;

    fn announcement(id: &str, status: AnnouncementStatus) -> AnnouncementDto {
        AnnouncementDto {
            id: id.to_string(),
            title: "Doors open".to_string(),
            body: "Doors open at 9:00 sharp".to_string(),
            audience: Audience::AllAttendees,
            status,
            scheduled_at: None,
            sent_at: None,
            recipients: 0,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    fn page(items: Vec<AnnouncementDto>, page: u32, total: u64) -> Paginated<AnnouncementDto> {
        Paginated {
            items,
            pagination: PaginationState::new(page, 25, total),
        }
    }

    fn limits(used: u32) -> AnnouncementLimits {
        AnnouncementLimits {
            daily_limit: 10,
            daily_used: used,
            monthly_limit: 100,
            monthly_used: 40,
        }
    }

    #[test]
    fn test_polling_follows_in_progress_rows() {
        let mut state = DashboardState::default();
        state.items = vec![announcement("a", AnnouncementStatus::Sent)];
        assert!(!state.needs_polling());

        state.items.push(announcement("b", AnnouncementStatus::Processing));
        assert!(state.needs_polling());
    }

    #[test]
    fn test_partial_failure_keeps_previous_values() {
        let mut state = DashboardState::default();
        state.stats = Some(AnnouncementStats {
            total: 3,
            ..Default::default()
        });

        let outcome = state.apply_refresh(
            Err(ApiError::network("offline")),
            Ok(limits(2)),
            Ok(page(vec![announcement("a", AnnouncementStatus::Draft)], 1, 1)),
        );

        assert_eq!(outcome.error.map(|e| e.kind), Some(ErrorKind::Network));
        assert!(!outcome.refetch);
        assert_eq!(state.stats.map(|s| s.total), Some(3));
        assert_eq!(state.limits, Some(limits(2)));
        assert_eq!(state.items.len(), 1);
        assert!(state.is_loaded);
    }

    #[test]
    fn test_sending_blocked_by_quota_or_anti_spam() {
        let mut state = DashboardState::default();
        assert!(state.can_send());

        state.limits = Some(limits(10));
        assert!(!state.can_send());

        state.limits = Some(limits(3));
        state.anti_spam = Some(AntiSpamStatus {
            level: AntiSpamLevel::Blocked,
            message: None,
            cooldown_seconds: Some(60),
        });
        assert!(!state.can_send());
        assert_eq!(
            state.quota_summary().as_deref(),
            Some("3 of 10 sent today, 60 left this month")
        );
    }

    #[test]
    fn test_only_settled_unsent_rows_can_be_deleted() {
        assert!(can_delete(&announcement("a", AnnouncementStatus::Draft)));
        assert!(can_delete(&announcement("a", AnnouncementStatus::Failed)));
        assert!(!can_delete(&announcement("a", AnnouncementStatus::Pending)));
        assert!(!can_delete(&announcement("a", AnnouncementStatus::Sent)));
    }
}
