//! Organization onboarding wizard
//!
//! - model.rs: step payloads and the submit outcome
//! - view_model.rs: wizard navigation and per-step form state
//! - steps.rs / view.rs: Leptos components

mod model;
mod steps;
mod view;
mod view_model;

pub use view::OnboardingWizard;
pub use view_model::OnboardingViewModel;
