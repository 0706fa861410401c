mod editor;
mod model;

use chrono::Utc;
use contracts::domain::a005_registration_timeline::aggregate::{PhaseStatus, RegistrationTimelineDto};
use contracts::shared::api::ErrorKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a005_registration_timeline::api;
use crate::shared::components::PageHeader;
use crate::shared::config::COUNTDOWN_TICK_MS;
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::timer::{BrowserScheduler, Scheduler};
use editor::TimelineEditor;
use model::{countdown_caption, phase_rows};

fn status_badge(status: PhaseStatus) -> AnyView {
    let color = match status {
        PhaseStatus::Upcoming => BadgeColor::Informative,
        PhaseStatus::Open => BadgeColor::Success,
        PhaseStatus::Closed => BadgeColor::Subtle,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge> }.into_any()
}

#[component]
pub fn TimelinePage(event_id: String) -> impl IntoView {
    let event_id = StoredValue::new(event_id);
    let notifier = use_notifier();
    let timeline: RwSignal<Option<RegistrationTimelineDto>> = RwSignal::new(None);
    let (editing, set_editing) = signal(false);
    let (loading, set_loading) = signal(false);

    let load = move || {
        set_loading.set(true);
        let event = event_id.get_value();
        spawn_local(async move {
            match api::fetch_timeline(&event).await {
                Ok(mut dto) => {
                    dto.sort_phases();
                    timeline.set(Some(dto));
                }
                Err(e) if e.kind == ErrorKind::NotFound => {
                    timeline.set(Some(RegistrationTimelineDto {
                        event_id: event.clone(),
                        phases: Vec::new(),
                    }));
                }
                Err(e) => notifier.error(&e),
            }
            set_loading.set(false);
        });
    };
    load();

    // Countdown clock; the interval is dropped with the page.
    let now = RwSignal::new(Utc::now());
    let ticker = StoredValue::new_local(Some(BrowserScheduler.repeat(
        COUNTDOWN_TICK_MS,
        Box::new(move || {
            now.try_set(Utc::now());
        }),
    )));
    on_cleanup(move || {
        ticker.try_update_value(|t| t.take());
    });

    let caption = move || {
        let now = now.get();
        timeline.with(|t| t.as_ref().and_then(|t| countdown_caption(t, now)))
    };
    let current = move || {
        let now = now.get();
        timeline.with(|t| {
            t.as_ref()
                .and_then(|t| t.current_phase(now))
                .map(|p| p.name.clone())
        })
    };

    let on_saved = Callback::new(move |mut saved: RegistrationTimelineDto| {
        saved.sort_phases();
        timeline.set(Some(saved));
        set_editing.set(false);
    });
    let on_cancel = Callback::new(move |_: ()| set_editing.set(false));

    view! {
        <PageFrame page_id="a005_registration_timeline--detail" category=PageCategory::Detail>
            <PageHeader
                title="Registration timeline"
                subtitle=Signal::derive(move || current().map(|name| format!("Now open: {}", name)))
            >
                <Show when=move || !editing.get()>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_editing.set(true)
                        disabled=Signal::derive(move || timeline.with(|t| t.is_none()))
                    >
                        {icon("edit")}
                        " Edit phases"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </Show>
            </PageHeader>

            <div class="page__content">
                {move || match (timeline.get(), editing.get()) {
                    (None, _) => view! { <Spinner /> }.into_any(),
                    (Some(dto), true) => view! {
                        <TimelineEditor timeline=dto on_saved=on_saved on_cancel=on_cancel />
                    }.into_any(),
                    (Some(dto), false) if dto.phases.is_empty() => view! {
                        <div class="empty-state">
                            {icon("calendar")}
                            <p>"No registration phases yet."</p>
                        </div>
                    }.into_any(),
                    (Some(_), false) => view! {
                        <div class="countdown">
                            {icon("clock")}
                            <span class="countdown__caption">
                                {move || caption().unwrap_or_else(|| "Registration has ended".to_string())}
                            </span>
                        </div>
                        <div class="table-wrapper">
                            <Table attr:style="width: 100%;">
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell min_width=160.0>"Phase"</TableHeaderCell>
                                        <TableHeaderCell min_width=260.0>"Window"</TableHeaderCell>
                                        <TableHeaderCell min_width=100.0>"Status"</TableHeaderCell>
                                        <TableHeaderCell min_width=120.0>"Registered"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    <For
                                        each=move || {
                                            let now = now.get();
                                            timeline.with(|t| t.as_ref().map(|t| phase_rows(t, now)).unwrap_or_default())
                                        }
                                        key=|row| (row.id.clone(), row.status)
                                        children=move |row| view! {
                                            <TableRow>
                                                <TableCell><TableCellLayout>{row.name}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.window}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{status_badge(row.status)}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{row.seats}</TableCellLayout></TableCell>
                                            </TableRow>
                                        }
                                    />
                                </TableBody>
                            </Table>
                        </div>
                    }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}
