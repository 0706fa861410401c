//! Sidebar with one entry per section.

use crate::layout::global_context::{use_global_context, Section};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let has_event = move || ctx.current_event_id().is_some();

    view! {
        <div class="app-sidebar__content">
            <div class="app-sidebar__context">
                <div class="app-sidebar__org">
                    {move || ctx.current_org().map(|org| view! {
                        <span>{org.name}</span>
                        {org.is_verified.then(|| view! {
                            <span class="app-sidebar__verified" title="Verified organization">{icon("check")}</span>
                        })}
                    })}
                </div>
                <div class="app-sidebar__event">
                    {move || ctx.current_event().map(|event| event.name).unwrap_or_else(|| "No event selected".to_string())}
                </div>
            </div>
            {Section::ALL.into_iter().map(|section| {
                let muted = move || section.needs_event() && !has_event();
                view! {
                    <div
                        class="app-sidebar__item"
                        class:app-sidebar__item--active=move || ctx.active.get() == section
                        class:app-sidebar__item--muted=muted
                        style:padding-left="12px"
                        title=move || muted().then_some("Pick an event in the header first")
                        on:click=move |_| ctx.activate(section)
                    >
                        <div class="app-sidebar__item-content">
                            {icon(section.icon())}
                            <span>{section.label()}</span>
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
