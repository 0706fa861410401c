use contracts::domain::a001_organization::aggregate::{OnboardingStep, RegistrationProgressDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model::{self, StepForm, SubmitOutcome};
use crate::domain::a001_organization::api;
use crate::shared::notify::Notifier;
use crate::shared::wizard::StepWizard;

/// Navigation state of the onboarding wizard.
#[derive(Clone, Copy)]
pub struct OnboardingViewModel {
    pub wizard: RwSignal<StepWizard<OnboardingStep>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    notifier: Notifier,
}

impl OnboardingViewModel {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            wizard: RwSignal::new(StepWizard::new(OnboardingStep::ALL)),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            notifier,
        }
    }

    fn apply_progress(&self, progress: &RegistrationProgressDto) {
        self.wizard
            .update(|w| w.set_completion(|step| progress.is_done(step)));
    }

    /// Load saved progress and open the first unfinished step.
    pub fn load(&self) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_progress().await {
                Ok(progress) => {
                    this.apply_progress(&progress);
                    this.wizard.update(|w| w.resume());
                    this.error.set(None);
                }
                Err(e) => this.error.set(Some(e.user_message())),
            }
            this.loading.set(false);
        });
    }

    /// A step was saved: refresh progress from the server, then advance.
    pub fn step_saved(&self, step: OnboardingStep) {
        let this = *self;
        spawn_local(async move {
            match api::fetch_progress().await {
                Ok(progress) => this.apply_progress(&progress),
                Err(e) => log::warn!("progress refresh failed: {}", e),
            }
            this.wizard.update(|w| {
                w.mark_completed(step);
                w.go_next();
            });
        });
    }

    pub fn back(&self) {
        self.wizard.update(|w| {
            w.go_back();
        });
    }

    pub fn jump(&self, index: usize) {
        let mut result = Ok(());
        self.wizard.update(|w| result = w.jump_to(index));
        if let Err(e) = result {
            self.notifier.warning(e.to_string());
        }
    }
}

/// Form state for one step's payload.
pub struct StepFormState<T: StepForm> {
    pub form: RwSignal<T>,
    pub errors: RwSignal<FieldErrors>,
    pub saving: RwSignal<bool>,
    pub loading: RwSignal<bool>,
}

impl<T: StepForm> Clone for StepFormState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: StepForm> Copy for StepFormState<T> {}

impl<T: StepForm> StepFormState<T> {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(T::default()),
            errors: RwSignal::new(FieldErrors::new()),
            saving: RwSignal::new(false),
            loading: RwSignal::new(false),
        }
    }

    /// Prefill from what the backend already has for this step.
    pub fn load(&self, notifier: Notifier) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match model::load::<T>().await {
                Ok(data) => this.form.set(data),
                Err(e) => notifier.error(&e),
            }
            this.loading.set(false);
        });
    }

    /// Signal/setter pair for one text field of the payload.
    pub fn field(
        &self,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> (Signal<String>, Callback<String>) {
        let form = self.form;
        let errors = self.errors;
        (
            Signal::derive(move || form.with(get)),
            Callback::new(move |value: String| {
                form.update(|f| set(f, value));
                if !errors.with_untracked(|e| e.is_empty()) {
                    errors.set(FieldErrors::new());
                }
            }),
        )
    }

    pub fn submit(&self, notifier: Notifier, on_saved: Callback<OnboardingStep>) {
        if self.saving.get_untracked() {
            return;
        }
        let this = *self;
        let form = this.form.get_untracked();
        this.saving.set(true);
        spawn_local(async move {
            let outcome = model::submit(&form).await;
            match &outcome {
                SubmitOutcome::Saved => notifier.success(format!("{} saved", T::STEP.label())),
                SubmitOutcome::AlreadyDone => {
                    notifier.info(format!("{} was already completed", T::STEP.label()))
                }
                SubmitOutcome::Invalid(errors) => this.errors.set(errors.clone()),
                SubmitOutcome::Failed(e) => notifier.error(e),
            }
            if outcome.advances() {
                on_saved.run(T::STEP);
            }
            this.saving.set(false);
        });
    }
}
