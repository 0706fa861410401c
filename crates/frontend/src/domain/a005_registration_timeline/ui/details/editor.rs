use contracts::domain::a005_registration_timeline::aggregate::RegistrationTimelineDto;
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::model::{build_timeline, PhaseInput};
use crate::domain::a005_registration_timeline::api;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;

/// One input of a phase row; errors are looked up by the row's current index.
#[component]
fn PhaseCell(
    id: String,
    field: &'static str,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: &'static str,
    rows: RwSignal<Vec<PhaseInput>>,
    errors: RwSignal<FieldErrors>,
    get: fn(&PhaseInput) -> String,
    set: fn(&mut PhaseInput, String),
) -> impl IntoView {
    let id = StoredValue::new(id);
    let index = move || id.with_value(|id| rows.with(|r| r.iter().position(|p| &p.id == id)));
    let error = move || {
        index().and_then(|i| {
            errors.with(|e| e.get(&format!("phases.{}.{}", i, field)).map(str::to_string))
        })
    };
    let value = move || {
        id.with_value(|id| rows.with(|r| r.iter().find(|p| &p.id == id).map(get)))
            .unwrap_or_default()
    };
    let on_input = move |text: String| {
        id.with_value(|id| {
            rows.update(|r| {
                if let Some(p) = r.iter_mut().find(|p| &p.id == id) {
                    set(p, text);
                }
            })
        });
    };

    view! {
        <td class="timeline-editor__cell" class:timeline-editor__cell--invalid=move || error().is_some()>
            <input
                type=input_type.unwrap_or("text")
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            {move || error().map(|e| view! { <div class="field-error">{e}</div> })}
        </td>
    }
}

#[component]
pub fn TimelineEditor(
    timeline: RegistrationTimelineDto,
    on_saved: Callback<RegistrationTimelineDto>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let notifier = use_notifier();
    let event_id = StoredValue::new(timeline.event_id.clone());
    let rows = RwSignal::new(timeline.phases.iter().map(PhaseInput::from).collect::<Vec<_>>());
    let errors = RwSignal::new(FieldErrors::default());
    let (saving, set_saving) = signal(false);

    let add_phase = move || {
        rows.update(|r| {
            let next = PhaseInput::after(r.last());
            r.push(next);
        });
    };

    let remove_phase = move |id: String| {
        rows.update(|r| r.retain(|p| p.id != id));
        // Indexes shifted; stale messages would point at the wrong rows.
        errors.set(FieldErrors::default());
    };

    let handle_save = move || {
        let event = event_id.get_value();
        let built = rows.with_untracked(|r| build_timeline(&event, r));
        let dto = match built {
            Ok(dto) => dto,
            Err(e) => {
                notifier.warning(e.summary());
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        set_saving.set(true);

        spawn_local(async move {
            match api::save_timeline(&event, &dto).await {
                Ok(saved) => {
                    notifier.success("Registration timeline saved");
                    on_saved.run(saved);
                }
                Err(e) => {
                    notifier.error(&e);
                    set_saving.set(false);
                }
            }
        });
    };

    let general_error = move || errors.with(|e| e.get("phases").map(str::to_string));

    view! {
        <div class="timeline-editor">
            {move || general_error().map(|e| view! { <div class="alert alert--error">{e}</div> })}
            <table class="timeline-editor__table">
                <thead>
                    <tr>
                        <th>"Phase"</th>
                        <th>"Starts"</th>
                        <th>"Ends"</th>
                        <th>"Capacity"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.with(|r| r.iter().map(|p| p.id.clone()).collect::<Vec<_>>())
                        key=|id| id.clone()
                        children=move |id| {
                            let for_remove = id.clone();
                            view! {
                                <tr>
                                    <PhaseCell id=id.clone() field="name" placeholder="Early bird" rows=rows errors=errors
                                        get=|p| p.name.clone() set=|p, v| p.name = v />
                                    <PhaseCell id=id.clone() field="starts_at" input_type="datetime-local" rows=rows errors=errors
                                        get=|p| p.starts_at.clone() set=|p, v| p.starts_at = v />
                                    <PhaseCell id=id.clone() field="ends_at" input_type="datetime-local" rows=rows errors=errors
                                        get=|p| p.ends_at.clone() set=|p, v| p.ends_at = v />
                                    <PhaseCell id=id field="capacity" input_type="number" placeholder="Unlimited" rows=rows
                                        errors=errors get=|p| p.capacity.clone() set=|p, v| p.capacity = v />
                                    <td>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| remove_phase(for_remove.clone())
                                            attr:title="Remove phase"
                                        >
                                            {icon("trash")}
                                        </Button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="timeline-editor__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| add_phase()>
                    {icon("plus")}
                    " Add phase"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| handle_save()
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save timeline" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}
