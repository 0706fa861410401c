use contracts::domain::a001_organization::aggregate::OnboardingStep;
use contracts::domain::a001_organization::steps::{AddressDto, BasicInfoDto, ContactDto, PayoutDto};
use contracts::shared::api::{ApiError, ApiResult};
use contracts::shared::validation::FieldErrors;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::a001_organization::api;

/// Payload of one onboarding step.
pub trait StepForm:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const STEP: OnboardingStep;

    fn validate(&self) -> Result<(), FieldErrors>;
}

impl StepForm for BasicInfoDto {
    const STEP: OnboardingStep = OnboardingStep::Basic;

    fn validate(&self) -> Result<(), FieldErrors> {
        BasicInfoDto::validate(self)
    }
}

impl StepForm for AddressDto {
    const STEP: OnboardingStep = OnboardingStep::Address;

    fn validate(&self) -> Result<(), FieldErrors> {
        AddressDto::validate(self)
    }
}

impl StepForm for ContactDto {
    const STEP: OnboardingStep = OnboardingStep::Contact;

    fn validate(&self) -> Result<(), FieldErrors> {
        ContactDto::validate(self)
    }
}

impl StepForm for PayoutDto {
    const STEP: OnboardingStep = OnboardingStep::Payout;

    fn validate(&self) -> Result<(), FieldErrors> {
        PayoutDto::validate(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved,
    /// The backend already had this step (`*_EXISTS`); treated as saved.
    AlreadyDone,
    Invalid(FieldErrors),
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn from_result(result: ApiResult<()>) -> Self {
        match result {
            Ok(()) => SubmitOutcome::Saved,
            Err(e) if e.is_already_done() => SubmitOutcome::AlreadyDone,
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    /// Whether the wizard may advance.
    pub fn advances(&self) -> bool {
        matches!(self, SubmitOutcome::Saved | SubmitOutcome::AlreadyDone)
    }
}

pub async fn load<T: StepForm>() -> ApiResult<T> {
    Ok(api::fetch_step::<T>(T::STEP).await?.unwrap_or_default())
}

/// Validate locally, then post; nothing is sent when validation fails.
pub async fn submit<T: StepForm>(form: &T) -> SubmitOutcome {
    if let Err(errors) = form.validate() {
        return SubmitOutcome::Invalid(errors);
    }
    SubmitOutcome::from_result(api::save_step(T::STEP, form).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::api::ErrorKind;

    #[test]
    fn test_exists_code_counts_as_success() {
        let err = ApiError::new(ErrorKind::Conflict, "already registered")
            .with_code("ORGANIZATION_EXISTS");
        let outcome = SubmitOutcome::from_result(Err(err));
        assert_eq!(outcome, SubmitOutcome::AlreadyDone);
        assert!(outcome.advances());
    }

    #[test]
    fn test_failures_do_not_advance() {
        let outcome = SubmitOutcome::from_result(Err(ApiError::network("offline")));
        assert!(!outcome.advances());
        assert!(!SubmitOutcome::Invalid(FieldErrors::new()).advances());
        assert!(SubmitOutcome::from_result(Ok(())).advances());
    }

    #[test]
    fn test_steps_are_bound_to_payloads() {
        assert_eq!(BasicInfoDto::STEP, OnboardingStep::Basic);
        assert_eq!(PayoutDto::STEP, OnboardingStep::Payout);
    }
}
