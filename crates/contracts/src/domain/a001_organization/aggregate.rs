use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Organization
// ============================================================================

/// Organization the signed-in admin belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub is_verified: bool,
}

// ============================================================================
// Onboarding steps
// ============================================================================

/// Steps of the organization onboarding wizard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    Basic,
    Address,
    Contact,
    Payout,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Basic,
        OnboardingStep::Address,
        OnboardingStep::Contact,
        OnboardingStep::Payout,
    ];

    /// Path segment used by `/org/register/{step}` and key in the progress map.
    pub fn key(&self) -> &'static str {
        match self {
            OnboardingStep::Basic => "basic",
            OnboardingStep::Address => "address",
            OnboardingStep::Contact => "contact",
            OnboardingStep::Payout => "payout",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OnboardingStep::Basic => "Basic information",
            OnboardingStep::Address => "Address",
            OnboardingStep::Contact => "Contact details",
            OnboardingStep::Payout => "Payout",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Response of `GET /org/register/progress`: which steps the backend considers done.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationProgressDto {
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub steps: BTreeMap<String, bool>,
}

impl RegistrationProgressDto {
    pub fn is_done(&self, step: OnboardingStep) -> bool {
        self.steps.get(step.key()).copied().unwrap_or(false)
    }

    /// Completion flags for every known step; unknown keys from the server are ignored.
    pub fn completion(&self) -> Vec<(OnboardingStep, bool)> {
        OnboardingStep::ALL
            .iter()
            .map(|s| (*s, self.is_done(*s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_keys_roundtrip() {
        for step in OnboardingStep::ALL {
            assert_eq!(OnboardingStep::from_key(step.key()), Some(step));
        }
        assert_eq!(OnboardingStep::from_key("billing"), None);
    }

    #[test]
    fn test_progress_ignores_unknown_steps() {
        let body = r#"{"organization_id":"org-1","steps":{"basic":true,"address":false,"legacy":true}}"#;
        let progress: RegistrationProgressDto = serde_json::from_str(body).unwrap();
        assert_eq!(
            progress.completion(),
            vec![
                (OnboardingStep::Basic, true),
                (OnboardingStep::Address, false),
                (OnboardingStep::Contact, false),
                (OnboardingStep::Payout, false),
            ]
        );
    }
}
