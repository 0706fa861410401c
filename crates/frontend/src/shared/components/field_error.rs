use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

/// Inline message under a form field, empty when the field is valid.
#[component]
pub fn FieldError(#[prop(into)] errors: Signal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| {
            e.get(field)
                .map(|msg| view! { <div class="field-error">{msg.to_string()}</div> })
        })
    }
}
