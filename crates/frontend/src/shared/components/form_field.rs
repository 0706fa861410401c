use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use super::field_error::FieldError;

/// Labelled `<input>` with its inline validation message.
#[component]
pub fn TextField(
    label: &'static str,
    /// Key into the form's `FieldErrors`
    field: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] errors: Signal<FieldErrors>,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let id = format!("field-{}", field.replace('.', "-"));

    view! {
        <div class="form__group" class:form__group--invalid=move || errors.with(|e| e.has(field))>
            <label for=id.clone()>{label}</label>
            <input
                id=id
                type=input_type.unwrap_or("text")
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            <FieldError errors=errors field=field />
        </div>
    }
}

/// Multi-line variant of [`TextField`].
#[component]
pub fn TextAreaField(
    label: &'static str,
    field: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(into)] errors: Signal<FieldErrors>,
    #[prop(optional)] rows: Option<u32>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--invalid=move || errors.with(|e| e.has(field))>
            <label>{label}</label>
            <textarea
                rows=rows.unwrap_or(4).to_string()
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            <FieldError errors=errors field=field />
        </div>
    }
}

/// Empty input means `None`.
pub fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("   ".into()), None);
        assert_eq!(optional_text(" site ".into()), Some("site".to_string()));
    }
}
