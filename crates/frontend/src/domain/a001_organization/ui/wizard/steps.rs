use contracts::domain::a001_organization::aggregate::OnboardingStep;
use contracts::domain::a001_organization::steps::{AddressDto, BasicInfoDto, ContactDto, PayoutDto};
use contracts::shared::validation::slugify;
use leptos::prelude::*;
use thaw::*;

use super::model::StepForm;
use super::view_model::StepFormState;
use crate::shared::components::{optional_text, TextAreaField, TextField};
use crate::shared::notify::use_notifier;

/// Back / Continue row shared by every step.
#[component]
fn StepActions<T: StepForm>(
    state: StepFormState<T>,
    on_saved: Callback<OnboardingStep>,
    #[prop(optional)] on_back: Option<Callback<()>>,
) -> impl IntoView {
    let notifier = use_notifier();
    let busy = Signal::derive(move || state.saving.get() || state.loading.get());

    view! {
        <div class="wizard__actions">
            {on_back.map(|back| view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| back.run(()) disabled=busy>
                    "Back"
                </Button>
            })}
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| state.submit(notifier, on_saved)
                disabled=busy
            >
                {move || if state.saving.get() { "Saving..." } else { "Save and continue" }}
            </Button>
        </div>
    }
}

#[component]
pub fn BasicStep(on_saved: Callback<OnboardingStep>) -> impl IntoView {
    let state = StepFormState::<BasicInfoDto>::new();
    state.load(use_notifier());
    let errors = state.errors;
    let busy = Signal::derive(move || state.saving.get());

    // The slug follows the name until the user edits it by hand.
    let on_name = Callback::new(move |value: String| {
        state.form.update(|f| {
            if f.slug.is_empty() || f.slug == slugify(&f.name) {
                f.slug = slugify(&value);
            }
            f.name = value;
        });
    });
    let name = Signal::derive(move || state.form.with(|f| f.name.clone()));
    let (slug, on_slug) = state.field(|f| f.slug.clone(), |f, v| f.slug = v.to_lowercase());
    let (category, on_category) = state.field(|f| f.category.clone(), |f, v| f.category = v);
    let (description, on_description) = state.field(
        |f| f.description.clone().unwrap_or_default(),
        |f, v| f.description = optional_text(v),
    );

    view! {
        <div class="wizard__step">
            <TextField label="Organization name" field="name" value=name on_input=on_name errors=errors disabled=busy />
            <TextField label="Public URL slug" field="slug" value=slug on_input=on_slug errors=errors
                placeholder="my-organization" disabled=busy />
            <TextField label="Category" field="category" value=category on_input=on_category errors=errors
                placeholder="Conference, meetup, festival..." disabled=busy />
            <TextAreaField label="Description" field="description" value=description on_input=on_description
                errors=errors disabled=busy />
            <StepActions state=state on_saved=on_saved />
        </div>
    }
}

#[component]
pub fn AddressStep(
    on_saved: Callback<OnboardingStep>,
    on_back: Callback<()>,
) -> impl IntoView {
    let state = StepFormState::<AddressDto>::new();
    state.load(use_notifier());
    let errors = state.errors;
    let busy = Signal::derive(move || state.saving.get());

    let (line1, on_line1) = state.field(|f| f.line1.clone(), |f, v| f.line1 = v);
    let (line2, on_line2) = state.field(
        |f| f.line2.clone().unwrap_or_default(),
        |f, v| f.line2 = optional_text(v),
    );
    let (city, on_city) = state.field(|f| f.city.clone(), |f, v| f.city = v);
    let (postal, on_postal) = state.field(|f| f.postal_code.clone(), |f, v| f.postal_code = v);
    let (country, on_country) =
        state.field(|f| f.country.clone(), |f, v| f.country = v.trim().to_uppercase());

    view! {
        <div class="wizard__step">
            <TextField label="Address" field="line1" value=line1 on_input=on_line1 errors=errors disabled=busy />
            <TextField label="Address line 2" field="line2" value=line2 on_input=on_line2 errors=errors disabled=busy />
            <TextField label="City" field="city" value=city on_input=on_city errors=errors disabled=busy />
            <TextField label="Postal code" field="postal_code" value=postal on_input=on_postal errors=errors disabled=busy />
            <TextField label="Country" field="country" value=country on_input=on_country errors=errors
                placeholder="DE" disabled=busy />
            <StepActions state=state on_saved=on_saved on_back=on_back />
        </div>
    }
}

#[component]
pub fn ContactStep(
    on_saved: Callback<OnboardingStep>,
    on_back: Callback<()>,
) -> impl IntoView {
    let state = StepFormState::<ContactDto>::new();
    state.load(use_notifier());
    let errors = state.errors;
    let busy = Signal::derive(move || state.saving.get());

    let (email, on_email) = state.field(|f| f.email.clone(), |f, v| f.email = v.trim().to_string());
    let (phone, on_phone) = state.field(|f| f.phone.clone(), |f, v| f.phone = v);
    let (website, on_website) = state.field(
        |f| f.website.clone().unwrap_or_default(),
        |f, v| f.website = optional_text(v),
    );

    view! {
        <div class="wizard__step">
            <TextField label="Contact email" field="email" value=email on_input=on_email errors=errors
                input_type="email" disabled=busy />
            <TextField label="Phone" field="phone" value=phone on_input=on_phone errors=errors
                input_type="tel" placeholder="+49 30 1234567" disabled=busy />
            <TextField label="Website" field="website" value=website on_input=on_website errors=errors
                input_type="url" placeholder="https://" disabled=busy />
            <StepActions state=state on_saved=on_saved on_back=on_back />
        </div>
    }
}

#[component]
pub fn PayoutStep(
    on_saved: Callback<OnboardingStep>,
    on_back: Callback<()>,
) -> impl IntoView {
    let state = StepFormState::<PayoutDto>::new();
    state.load(use_notifier());
    let errors = state.errors;
    let busy = Signal::derive(move || state.saving.get());

    let (holder, on_holder) = state.field(|f| f.account_holder.clone(), |f, v| f.account_holder = v);
    let (iban, on_iban) = state.field(
        |f| f.iban.clone(),
        |f, v| f.iban = v.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_uppercase(),
    );
    let (tax_id, on_tax_id) = state.field(
        |f| f.tax_id.clone().unwrap_or_default(),
        |f, v| f.tax_id = optional_text(v),
    );

    view! {
        <div class="wizard__step">
            <TextField label="Account holder" field="account_holder" value=holder on_input=on_holder
                errors=errors disabled=busy />
            <TextField label="IBAN" field="iban" value=iban on_input=on_iban errors=errors disabled=busy />
            <TextField label="Tax ID" field="tax_id" value=tax_id on_input=on_tax_id errors=errors disabled=busy />
            <StepActions state=state on_saved=on_saved on_back=on_back />
        </div>
    }
}
