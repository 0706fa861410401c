mod state;

use contracts::domain::a003_announcement::aggregate::{AnnouncementDto, AnnouncementStatus};
use contracts::domain::a003_announcement::stats::{AnnouncementStats, AntiSpamLevel};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::{AnnouncementDetails, CreateAnnouncementForm};
use crate::domain::a003_announcement::api;
use crate::shared::components::{CardTone, PaginationControls, StatCard};
use crate::shared::config::POLL_INTERVAL_MS;
use crate::shared::date_utils::{format_datetime, format_datetime_opt};
use crate::shared::icons::icon;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::polling::PollingFetcher;
use state::{can_delete, create_state, RefreshOutcome, STATUS};

pub use state::DashboardState;

pub fn status_badge(status: AnnouncementStatus) -> AnyView {
    let color = match status {
        AnnouncementStatus::Draft => BadgeColor::Subtle,
        AnnouncementStatus::Scheduled => BadgeColor::Informative,
        AnnouncementStatus::Pending | AnnouncementStatus::Processing => BadgeColor::Warning,
        AnnouncementStatus::Sent => BadgeColor::Success,
        AnnouncementStatus::Failed => BadgeColor::Danger,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge> }.into_any()
}

#[component]
pub fn AnnouncementDashboard(event_id: String) -> impl IntoView {
    let event_id = StoredValue::new(event_id);
    let state = create_state();
    let notifier = use_notifier();
    let (loading, set_loading) = signal(false);
    let (show_create, set_show_create) = signal(false);
    let viewing: RwSignal<Option<String>> = RwSignal::new(None);
    let status_filter = RwSignal::new(String::new());

    // Stats, limits and the list are independent; join them.
    let load_data = move |quiet: bool| {
        if !quiet {
            set_loading.set(true);
        }
        let event = event_id.get_value();
        let filters = state.with_untracked(|s| s.filters.clone());
        spawn_local(async move {
            let (stats, limits, list) = futures::join!(
                api::fetch_stats(&event),
                api::fetch_limits(&event),
                api::fetch_announcements(&event, &filters),
            );
            let mut outcome = RefreshOutcome::default();
            state.update(|s| outcome = s.apply_refresh(stats, limits, list));
            set_loading.set(false);
            let RefreshOutcome { error, refetch } = outcome;
            if let Some(e) = error {
                // Poll ticks stay quiet; the next tick retries anyway.
                if !quiet {
                    notifier.error(&e);
                }
            }
            if refetch {
                let filters = state.with_untracked(|s| s.filters.clone());
                if let Ok(page) = api::fetch_announcements(&event, &filters).await {
                    state.update(|s| s.items = s.filters.apply_response(page).0);
                }
            }
        });
    };

    let load_anti_spam = move || {
        let event = event_id.get_value();
        spawn_local(async move {
            match api::fetch_anti_spam(&event).await {
                Ok(status) => state.update(|s| s.anti_spam = Some(status)),
                Err(e) => log::warn!("anti-spam status unavailable: {}", e),
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data(false);
            load_anti_spam();
        }
    });

    let poller = StoredValue::new_local(PollingFetcher::new("announcements", POLL_INTERVAL_MS));
    Effect::new(move |_| {
        let in_progress = state.with(|s| s.needs_polling());
        poller.update_value(|p| {
            p.watch(in_progress, move || load_data(true));
        });
    });
    on_cleanup(move || {
        poller.try_update_value(|p| p.stop());
    });

    Effect::new(move |prev: Option<String>| {
        let current = status_filter.get();
        if prev.is_some_and(|p| p != current) {
            state.update(|s| s.filters.set(STATUS, current.clone()));
            load_data(false);
        }
        current
    });

    let go_to_page = move |page: u32| {
        state.update(|s| s.filters.set_page(page));
        load_data(false);
    };

    let change_page_size = move |size: u32| {
        state.update(|s| s.filters.set_limit(size));
        load_data(false);
    };

    let delete_announcement = move |announcement: AnnouncementDto| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Delete \"{}\"?", announcement.title))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let event = event_id.get_value();
        spawn_local(async move {
            match api::delete_announcement(&event, &announcement.id).await {
                Ok(()) => {
                    notifier.success("Announcement deleted");
                    load_data(false);
                }
                Err(e) => notifier.error(&e),
            }
        });
    };

    let stat = move |pick: fn(&AnnouncementStats) -> u64| {
        Signal::derive(move || state.with(|s| s.stats.as_ref().map(pick)))
    };
    let failed_tone = Signal::derive(move || {
        match state.with(|s| s.stats.map(|st| st.failed).unwrap_or(0)) {
            0 => CardTone::Neutral,
            _ => CardTone::Bad,
        }
    });
    let quota_tone = Signal::derive(move || {
        state.with(|s| match s.limits {
            Some(l) if !l.can_send() => CardTone::Bad,
            Some(l) if l.daily_usage_ratio() >= 0.8 => CardTone::Warning,
            Some(_) => CardTone::Good,
            None => CardTone::Neutral,
        })
    });

    let anti_spam_badge = move || {
        state.with(|s| s.anti_spam.clone()).map(|status| {
            let (color, label) = match status.level {
                AntiSpamLevel::Ok => (BadgeColor::Success, "Sending allowed"),
                AntiSpamLevel::Throttled => (BadgeColor::Warning, "Throttled"),
                AntiSpamLevel::Blocked => (BadgeColor::Danger, "Sending blocked"),
            };
            let title = status.message.unwrap_or_default();
            view! {
                <span title=title>
                    <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge>
                </span>
            }
        })
    };

    view! {
        <PageFrame page_id="a003_announcement--dashboard" category=PageCategory::Dashboard>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Announcements"</h1>
                    {anti_spam_badge}
                    <Show when=move || state.with(|s| s.needs_polling())>
                        <span class="page__hint">{icon("clock")}" Delivery in progress"</span>
                    </Show>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| set_show_create.set(true)
                        disabled=Signal::derive(move || !state.with(|s| s.can_send()))
                    >
                        {icon("plus")}
                        " New announcement"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            load_data(false);
                            load_anti_spam();
                        }
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Total" icon_name="megaphone" value=stat(|s| s.total as u64) />
                    <StatCard label="Sent" icon_name="send" value=stat(|s| s.sent as u64) />
                    <StatCard label="Scheduled" icon_name="clock" value=stat(|s| s.scheduled as u64) />
                    <StatCard label="Failed" icon_name="alert" value=stat(|s| s.failed as u64) tone=failed_tone />
                    <StatCard label="Recipients reached" icon_name="users" value=stat(|s| s.recipients_reached) />
                    <StatCard
                        label="Left today"
                        icon_name="check"
                        value=Signal::derive(move || state.with(|s| s.limits.map(|l| l.remaining_today() as u64)))
                        tone=quota_tone
                        subtitle=Signal::derive(move || state.with(|s| s.quota_summary()))
                    />
                </div>

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <Label>"Status"</Label>
                            <Select value=status_filter>
                                <option value="">"All"</option>
                                {AnnouncementStatus::ALL.iter().map(|s| view! {
                                    <option value=s.as_str()>{s.label()}</option>
                                }).collect_view()}
                            </Select>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=220.0>"Title"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Audience"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Status"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Scheduled"</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Sent"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Recipients"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|a| (a.id.clone(), a.status, a.recipients)
                                children=move |announcement| {
                                    let id = announcement.id.clone();
                                    let deletable = can_delete(&announcement);
                                    let for_delete = announcement.clone();
                                    let title = announcement.title.clone();
                                    let audience = announcement.audience.label();
                                    let status = announcement.status;
                                    let scheduled = format_datetime_opt(announcement.scheduled_at.as_ref());
                                    let sent = announcement.sent_at.as_ref().map(format_datetime).unwrap_or_default();
                                    let recipients = announcement.recipients;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <a
                                                        href="#"
                                                        on:click=move |ev| {
                                                            ev.prevent_default();
                                                            viewing.set(Some(id.clone()));
                                                        }
                                                    >
                                                        {title}
                                                    </a>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{audience}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{status_badge(status)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {scheduled}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {sent}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{recipients}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                {deletable.then(|| view! {
                                                    <Button
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| delete_announcement(for_delete.clone())
                                                        attr:title="Delete"
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                })}
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <PaginationControls
                    state=Signal::derive(move || state.with(|s| s.filters.pagination))
                    on_page_change=Callback::new(go_to_page)
                    on_page_size_change=Callback::new(change_page_size)
                />

                {move || show_create.get().then(|| view! {
                    <CreateAnnouncementForm
                        event_id=event_id.get_value()
                        on_close=move || set_show_create.set(false)
                        on_created=move || {
                            set_show_create.set(false);
                            load_data(false);
                        }
                    />
                })}

                {move || viewing.get().map(|id| view! {
                    <AnnouncementDetails
                        event_id=event_id.get_value()
                        announcement_id=id
                        on_close=move || viewing.set(None)
                        on_settled=move || load_data(true)
                    />
                })}
            </div>
        </PageFrame>
    }
}
