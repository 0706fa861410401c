use contracts::domain::a003_announcement::aggregate::{AnnouncementDto, CreateAnnouncementDto};
use contracts::domain::a003_announcement::stats::{
    AnnouncementLimits, AnnouncementStats, AntiSpamStatus,
};
use contracts::shared::api::ApiResult;
use contracts::shared::pagination::Paginated;

use crate::shared::api_client;
use crate::shared::api_utils::segment;
use crate::shared::pagination::FilterState;

fn base(event_id: &str) -> String {
    format!("/event/admin/announcement/{}", segment(event_id))
}

/// One page of announcements; filter `status`
pub async fn fetch_announcements(
    event_id: &str,
    filters: &FilterState,
) -> ApiResult<Paginated<AnnouncementDto>> {
    api_client::get_page(&base(event_id), filters).await
}

pub async fn fetch_announcement(event_id: &str, id: &str) -> ApiResult<AnnouncementDto> {
    api_client::get(&format!("{}/{}", base(event_id), segment(id))).await
}

pub async fn create_announcement(
    event_id: &str,
    dto: &CreateAnnouncementDto,
) -> ApiResult<AnnouncementDto> {
    api_client::post(&base(event_id), dto).await
}

pub async fn delete_announcement(event_id: &str, id: &str) -> ApiResult<()> {
    api_client::delete(&format!("{}/{}", base(event_id), segment(id))).await
}

pub async fn fetch_stats(event_id: &str) -> ApiResult<AnnouncementStats> {
    api_client::get(&format!("{}/stats", base(event_id))).await
}

pub async fn fetch_limits(event_id: &str) -> ApiResult<AnnouncementLimits> {
    api_client::get(&format!("{}/limits", base(event_id))).await
}

pub async fn fetch_anti_spam(event_id: &str) -> ApiResult<AntiSpamStatus> {
    api_client::get(&format!("{}/anti-spam", base(event_id))).await
}
