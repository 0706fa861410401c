use chrono::{DateTime, Utc};
use contracts::domain::a003_announcement::aggregate::{
    AnnouncementDto, Audience, CreateAnnouncementDto, MIN_SCHEDULE_LEAD_MINUTES,
};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::dashboard::status_badge;
use crate::domain::a003_announcement::api;
use crate::shared::components::{TextAreaField, TextField};
use crate::shared::config::POLL_INTERVAL_MS;
use crate::shared::date_utils::{format_datetime, format_datetime_opt, parse_input_value};
use crate::shared::notify::use_notifier;
use crate::shared::polling::PollingFetcher;

/// Raw form input; `scheduled_at` is the `datetime-local` string.
#[derive(Debug, Clone, PartialEq)]
struct AnnouncementForm {
    title: String,
    body: String,
    audience: String,
    scheduled_at: String,
}

impl Default for AnnouncementForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            audience: Audience::AllAttendees.as_str().to_string(),
            scheduled_at: String::new(),
        }
    }
}

impl AnnouncementForm {
    /// Input problems and content rules are reported together.
    /// An unparseable schedule is a field error, not "send now".
    fn to_dto(&self, now: DateTime<Utc>) -> Result<CreateAnnouncementDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        let scheduled_at = parse_input_value(&self.scheduled_at);
        errors.check(
            "scheduled_at",
            self.scheduled_at.trim().is_empty() || scheduled_at.is_some(),
            "Enter a valid date and time",
        );
        let audience = Audience::parse(&self.audience);
        errors.check("audience", audience.is_some(), "Choose an audience");

        let dto = CreateAnnouncementDto {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
            audience: audience.unwrap_or(Audience::AllAttendees),
            scheduled_at,
        };
        if let Err(rules) = dto.validate(now) {
            errors.merge(rules);
        }
        errors.into_result().map(|_| dto)
    }
}

#[component]
pub fn CreateAnnouncementForm<F1, F2>(event_id: String, on_close: F1, on_created: F2) -> impl IntoView
where
    F1: Fn() + Copy + Send + Sync + 'static,
    F2: Fn() + Copy + Send + Sync + 'static,
{
    let notifier = use_notifier();
    let event_id = StoredValue::new(event_id);
    let form = RwSignal::new(AnnouncementForm::default());
    let errors = RwSignal::new(FieldErrors::default());
    let (saving, set_saving) = signal(false);
    let audience = RwSignal::new(Audience::AllAttendees.as_str().to_string());

    Effect::new(move |_| {
        let value = audience.get();
        form.update(|f| f.audience = value);
    });

    let field = move |get: fn(&AnnouncementForm) -> String, set: fn(&mut AnnouncementForm, String)| {
        (
            Signal::derive(move || form.with(get)),
            Callback::new(move |value: String| form.update(|f| set(f, value))),
        )
    };
    let (title, on_title) = field(|f| f.title.clone(), |f, v| f.title = v);
    let (body, on_body) = field(|f| f.body.clone(), |f, v| f.body = v);
    let (scheduled, on_scheduled) = field(|f| f.scheduled_at.clone(), |f, v| f.scheduled_at = v);

    let handle_submit = move || {
        let dto = match form
            .with_untracked(|f| f.to_dto(Utc::now()))
        {
            Ok(dto) => dto,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        set_saving.set(true);
        let event = event_id.get_value();

        spawn_local(async move {
            match api::create_announcement(&event, &dto).await {
                Ok(created) => {
                    let message = match created.scheduled_at {
                        Some(at) => format!("Scheduled for {}", format_datetime(&at)),
                        None => "Announcement queued for delivery".to_string(),
                    };
                    notifier.success(message);
                    on_created();
                }
                Err(e) => {
                    notifier.error(&e);
                    set_saving.set(false);
                }
            }
        });
    };

    let busy = Signal::derive(move || saving.get());

    view! {
        <div class="modal-overlay">
            <div class="modal modal--wide">
                <div class="modal-header">
                    <h2>"New announcement"</h2>
                </div>
                <div class="modal-body">
                    <TextField label="Title" field="title" value=title on_input=on_title errors=errors disabled=busy />
                    <TextAreaField label="Message" field="body" value=body on_input=on_body errors=errors
                        rows=6 disabled=busy />
                    <div class="form__group">
                        <Label>"Audience"</Label>
                        <Select value=audience>
                            {Audience::ALL.iter().map(|a| view! {
                                <option value=a.as_str()>{a.label()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <TextField
                        label="Send at (leave empty to send now)"
                        field="scheduled_at"
                        input_type="datetime-local"
                        value=scheduled
                        on_input=on_scheduled
                        errors=errors
                        disabled=busy
                    />
                    <p class="form__hint">
                        {format!("Scheduled announcements need at least {} minutes of lead time.", MIN_SCHEDULE_LEAD_MINUTES)}
                    </p>
                </div>
                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| handle_submit() disabled=busy>
                        {move || if saving.get() { "Saving..." } else { "Create" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                </div>
            </div>
        </div>
    }
}

/// Read-only view of one announcement that keeps refreshing while it is
/// queued or sending.
#[component]
pub fn AnnouncementDetails<F1, F2>(
    event_id: String,
    announcement_id: String,
    on_close: F1,
    /// Called once the announcement leaves the in-progress states.
    on_settled: F2,
) -> impl IntoView
where
    F1: Fn() + Copy + Send + Sync + 'static,
    F2: Fn() + Copy + Send + Sync + 'static,
{
    let notifier = use_notifier();
    let ids = StoredValue::new((event_id, announcement_id));
    let item: RwSignal<Option<AnnouncementDto>> = RwSignal::new(None);

    let fetch = move || {
        let (event, id) = ids.get_value();
        spawn_local(async move {
            match api::fetch_announcement(&event, &id).await {
                Ok(dto) => item.set(Some(dto)),
                Err(e) => notifier.error(&e),
            }
        });
    };
    fetch();

    let poller = StoredValue::new_local(PollingFetcher::new("announcement", POLL_INTERVAL_MS));
    Effect::new(move |was_polling: Option<bool>| {
        let Some(status) = item.with(|i| i.as_ref().map(|a| a.status)) else {
            return false;
        };
        let polling = poller
            .try_update_value(|p| p.watch_status(&status, fetch))
            .unwrap_or(false);
        if was_polling == Some(true) && !polling {
            on_settled();
        }
        polling
    });
    on_cleanup(move || {
        poller.try_update_value(|p| p.stop());
    });

    view! {
        <div class="modal-overlay">
            <div class="modal modal--wide">
                {move || match item.get() {
                    None => view! {
                        <div class="modal-body"><Spinner /></div>
                    }.into_any(),
                    Some(a) => view! {
                        <div class="modal-header">
                            <h2>{a.title.clone()}</h2>
                            {status_badge(a.status)}
                        </div>
                        <div class="modal-body">
                            <dl class="details-list">
                                <dt>"Audience"</dt>
                                <dd>{a.audience.label()}</dd>
                                <dt>"Created"</dt>
                                <dd>{format_datetime(&a.created_at)}</dd>
                                <dt>"Scheduled"</dt>
                                <dd>{format_datetime_opt(a.scheduled_at.as_ref())}</dd>
                                <dt>"Sent"</dt>
                                <dd>{format_datetime_opt(a.sent_at.as_ref())}</dd>
                                <dt>"Recipients"</dt>
                                <dd>{a.recipients}</dd>
                            </dl>
                            <div class="announcement__body">{a.body.clone()}</div>
                        </div>
                    }.into_any(),
                }}
                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Close"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2029, 12, 1, 12, 0, 0).unwrap()
    }

    fn form(scheduled_at: &str) -> AnnouncementForm {
        AnnouncementForm {
            title: "  Doors open  ".to_string(),
            body: "Doors open at 9:00 sharp".to_string(),
            scheduled_at: scheduled_at.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_schedule_means_send_now() {
        let dto = form("").to_dto(now()).unwrap();
        assert_eq!(dto.title, "Doors open");
        assert_eq!(dto.audience, Audience::AllAttendees);
        assert_eq!(dto.scheduled_at, None);
    }

    #[test]
    fn test_garbled_schedule_is_a_field_error() {
        let errors = form("next tuesday").to_dto(now()).unwrap_err();
        assert!(errors.has("scheduled_at"));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let bad = AnnouncementForm {
            title: "Hi".to_string(),
            body: String::new(),
            audience: "everyone".to_string(),
            scheduled_at: "next tuesday".to_string(),
        };
        let errors = bad.to_dto(now()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("scheduled_at"), Some("Enter a valid date and time"));
        assert!(errors.has("audience"));
        assert!(errors.has("title"));
        assert_eq!(errors.get("body"), Some("Message is required"));
    }

    #[test]
    fn test_schedule_too_soon_is_reported_with_content_errors() {
        let mut f = form("2029-12-01T12:01");
        f.title = String::new();
        let errors = f.to_dto(now()).unwrap_err();
        assert!(errors.has("title"));
        assert!(errors.has("scheduled_at"));
    }

    #[test]
    fn test_schedule_parsed_from_input() {
        let dto = form("2030-01-02T10:15").to_dto(now()).unwrap();
        assert_eq!(
            dto.scheduled_at.map(|at| at.format("%Y-%m-%d %H:%M").to_string()),
            Some("2030-01-02 10:15".to_string())
        );
    }
}
