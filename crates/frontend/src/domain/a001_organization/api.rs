//! Organization endpoints: the admin's organizations and events, and the
//! onboarding registration steps.

use contracts::domain::a001_organization::aggregate::{
    OnboardingStep, OrganizationSummary, RegistrationProgressDto,
};
use contracts::domain::common::EventSummary;
use contracts::shared::api::{ApiResult, ErrorKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_client;
use crate::shared::api_utils::segment;

pub async fn fetch_my_organizations() -> ApiResult<Vec<OrganizationSummary>> {
    api_client::get("/org/mine").await
}

pub async fn fetch_events(org_id: &str) -> ApiResult<Vec<EventSummary>> {
    api_client::get(&format!("/org/{}/events", segment(org_id))).await
}

pub async fn fetch_progress() -> ApiResult<RegistrationProgressDto> {
    api_client::get("/org/register/progress").await
}

/// Saved data of one step; `None` when the step was never submitted.
pub async fn fetch_step<T: DeserializeOwned>(step: OnboardingStep) -> ApiResult<Option<T>> {
    match api_client::get(&format!("/org/register/{}", step.key())).await {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn save_step<T: Serialize>(step: OnboardingStep, data: &T) -> ApiResult<()> {
    api_client::post_ack(&format!("/org/register/{}", step.key()), data).await
}
