use contracts::domain::a005_registration_timeline::aggregate::RegistrationTimelineDto;
use contracts::shared::api::ApiResult;

use crate::shared::api_client;
use crate::shared::api_utils::segment;

fn path(event_id: &str) -> String {
    format!("/events/admin/timeline/{}", segment(event_id))
}

pub async fn fetch_timeline(event_id: &str) -> ApiResult<RegistrationTimelineDto> {
    api_client::get(&path(event_id)).await
}

/// Replaces every phase of the event; returns the stored timeline.
pub async fn save_timeline(
    event_id: &str,
    timeline: &RegistrationTimelineDto,
) -> ApiResult<RegistrationTimelineDto> {
    api_client::put(&path(event_id), timeline).await
}
