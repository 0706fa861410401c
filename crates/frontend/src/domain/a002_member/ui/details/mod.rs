use contracts::domain::a002_member::aggregate::{
    InviteMemberDto, MemberDto, MemberRole, MemberStatus, UpdateMemberDto,
};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_member::api;
use crate::domain::a002_member::ui::list::member_error_message;
use crate::shared::components::{optional_text, FieldError, TextField};
use crate::shared::notify::use_notifier;

/// Invite a new member by email. Owners cannot be invited.
#[component]
pub fn InviteMemberForm<F1, F2>(on_close: F1, on_invited: F2) -> impl IntoView
where
    F1: Fn() + Copy + Send + Sync + 'static,
    F2: Fn() + Copy + Send + Sync + 'static,
{
    let notifier = use_notifier();
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let role = RwSignal::new(MemberRole::Staff.as_str().to_string());
    let errors = RwSignal::new(FieldErrors::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let handle_submit = move || {
        let dto = InviteMemberDto {
            email: email.get_untracked().trim().to_string(),
            role: MemberRole::parse(&role.get_untracked()).unwrap_or(MemberRole::Staff),
            full_name: optional_text(full_name.get_untracked()),
        };
        if let Err(e) = dto.validate() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::default());
        set_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::invite_member(&dto).await {
                Ok(member) => {
                    notifier.success(format!("Invitation sent to {}", member.email));
                    on_invited();
                }
                Err(e) if e.is_already_done() => {
                    notifier.info(format!("{} is already a member", dto.email));
                    on_invited();
                }
                Err(e) => {
                    set_error.set(Some(member_error_message(&e)));
                    set_saving.set(false);
                }
            }
        });
    };

    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h2>"Invite member"</h2>
                </div>
                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <TextField
                        label="Email"
                        field="email"
                        input_type="email"
                        value=Signal::derive(move || email.get())
                        on_input=Callback::new(move |v: String| email.set(v))
                        errors=errors
                    />
                    <TextField
                        label="Full name"
                        field="full_name"
                        value=Signal::derive(move || full_name.get())
                        on_input=Callback::new(move |v: String| full_name.set(v))
                        errors=errors
                    />
                    <div class="form__group">
                        <Label>"Role"</Label>
                        <Select value=role>
                            {MemberRole::ASSIGNABLE.iter().map(|r| view! {
                                <option value=r.as_str()>{r.label()}</option>
                            }).collect_view()}
                        </Select>
                        <FieldError errors=errors field="role" />
                    </div>
                </div>
                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| handle_submit()
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Sending..." } else { "Send invite" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn EditMemberForm<F1, F2>(member: MemberDto, on_close: F1, on_saved: F2) -> impl IntoView
where
    F1: Fn() + Copy + Send + Sync + 'static,
    F2: Fn() + Copy + Send + Sync + 'static,
{
    let notifier = use_notifier();
    let member_id = member.id.clone();
    let heading = member.display_name().to_string();
    let full_name = RwSignal::new(member.full_name.clone().unwrap_or_default());
    let role = RwSignal::new(member.role.as_str().to_string());
    let status = RwSignal::new(member.status.as_str().to_string());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let handle_submit = move || {
        let dto = UpdateMemberDto {
            role: MemberRole::parse(&role.get_untracked()).unwrap_or(member.role),
            status: MemberStatus::parse(&status.get_untracked()).unwrap_or(member.status),
            full_name: optional_text(full_name.get_untracked()),
        };
        let id = member_id.clone();
        set_saving.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::update_member(&id, &dto).await {
                Ok(_) => {
                    notifier.success("Member updated");
                    on_saved();
                }
                Err(e) => {
                    set_error.set(Some(member_error_message(&e)));
                    set_saving.set(false);
                }
            }
        });
    };
    let handle_submit = StoredValue::new(handle_submit);

    view! {
        <div class="modal-overlay">
            <div class="modal">
                <div class="modal-header">
                    <h2>{heading}</h2>
                </div>
                <div class="modal-body">
                    {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                    <TextField
                        label="Full name"
                        field="full_name"
                        value=Signal::derive(move || full_name.get())
                        on_input=Callback::new(move |v: String| full_name.set(v))
                        errors=Signal::derive(FieldErrors::default)
                    />
                    <div class="form__group">
                        <Label>"Role"</Label>
                        <Select value=role>
                            {MemberRole::ASSIGNABLE.iter().map(|r| view! {
                                <option value=r.as_str()>{r.label()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <Label>"Status"</Label>
                        <Select value=status>
                            {MemberStatus::ALL.iter().map(|s| view! {
                                <option value=s.as_str()>{s.label()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                </div>
                <div class="modal-footer">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| handle_submit.with_value(|submit| submit())
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close()>
                        "Cancel"
                    </Button>
                </div>
            </div>
        </div>
    }
}
