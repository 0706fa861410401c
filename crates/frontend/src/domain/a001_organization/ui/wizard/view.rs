use contracts::domain::a001_organization::aggregate::OnboardingStep;
use leptos::prelude::*;
use thaw::*;

use super::steps::{AddressStep, BasicStep, ContactStep, PayoutStep};
use super::view_model::OnboardingViewModel;
use crate::layout::global_context::use_global_context;
use crate::layout::top_header::reload_organizations;
use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::{PageCategory, PageFrame};

#[component]
pub fn OnboardingWizard() -> impl IntoView {
    let ctx = use_global_context();
    let notifier = use_notifier();
    let vm = OnboardingViewModel::new(notifier);
    vm.load();

    let on_saved = Callback::new(move |step: OnboardingStep| {
        // The basic step creates the organization; the header selector should see it.
        if step == OnboardingStep::Basic {
            reload_organizations(ctx, notifier);
        }
        vm.step_saved(step);
    });
    let on_back = Callback::new(move |_: ()| vm.back());

    let current_step = Memo::new(move |_| vm.wizard.with(|w| w.current_step()));
    let is_complete = Memo::new(move |_| vm.wizard.with(|w| w.is_complete()));

    view! {
        <PageFrame page_id="a001_organization--wizard" category=PageCategory::Wizard>
            <PageHeader
                title="Organization onboarding"
                subtitle=Signal::derive(move || {
                    let (done, total) = vm.wizard.with(|w| (w.completed_count(), w.len()));
                    Some(format!("{} of {} steps completed", done, total))
                })
            />

            <div class="page__content">
                {move || vm.error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <StepIndicator vm=vm />

                <Show when=move || !vm.loading.get() fallback=|| view! { <Spinner /> }>
                    {move || {
                        if is_complete.get() {
                            return view! { <CompletionView /> }.into_any();
                        }
                        match current_step.get() {
                            Some(OnboardingStep::Basic) => view! { <BasicStep on_saved=on_saved /> }.into_any(),
                            Some(OnboardingStep::Address) => {
                                view! { <AddressStep on_saved=on_saved on_back=on_back /> }.into_any()
                            }
                            Some(OnboardingStep::Contact) => {
                                view! { <ContactStep on_saved=on_saved on_back=on_back /> }.into_any()
                            }
                            Some(OnboardingStep::Payout) => {
                                view! { <PayoutStep on_saved=on_saved on_back=on_back /> }.into_any()
                            }
                            None => ().into_any(),
                        }
                    }}
                </Show>
            </div>
        </PageFrame>
    }
}

/// Clickable step bar; locked steps stay disabled.
#[component]
fn StepIndicator(vm: OnboardingViewModel) -> impl IntoView {
    view! {
        <ol class="wizard__steps">
            {OnboardingStep::ALL
                .iter()
                .enumerate()
                .map(|(index, step)| {
                    let label = step.label();
                    let done = move || vm.wizard.with(|w| w.is_completed(index));
                    let current = move || vm.wizard.with(|w| w.current_index() == index && !w.is_complete());
                    let locked = move || !vm.wizard.with(|w| w.can_jump_to(index));
                    view! {
                        <li
                            class="wizard__step-marker"
                            class:wizard__step-marker--done=done
                            class:wizard__step-marker--current=current
                            class:wizard__step-marker--locked=locked
                        >
                            <button on:click=move |_| vm.jump(index) disabled=locked>
                                <span class="wizard__step-number">
                                    {move || if done() { icon("check") } else { (index + 1).to_string().into_any() }}
                                </span>
                                <span class="wizard__step-label">{label}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}

#[component]
fn CompletionView() -> impl IntoView {
    view! {
        <div class="wizard__complete">
            {icon("check")}
            <h2>"Your organization is set up"</h2>
            <p>"All onboarding steps are complete. You can now manage members and events."</p>
        </div>
    }
}
