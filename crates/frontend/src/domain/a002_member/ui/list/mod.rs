mod state;

use contracts::domain::a002_member::aggregate::{MemberDto, MemberRole, MemberStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::{EditMemberForm, InviteMemberForm};
use crate::domain::a002_member::api;
use crate::shared::components::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_utils::SortHeader;
use crate::shared::notify::use_notifier;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequireRole;
use state::{create_state, MemberRow, ROLE, SEARCH, STATUS};

pub use state::{member_error_message, MembersListState};

#[component]
pub fn MembersPage() -> impl IntoView {
    view! {
        <RequireRole roles=MemberRole::ALL.to_vec()>
            <MembersList />
        </RequireRole>
    }
}

fn role_badge(role: MemberRole) -> AnyView {
    let color = match role {
        MemberRole::Owner => BadgeColor::Important,
        MemberRole::Admin => BadgeColor::Warning,
        MemberRole::Manager => BadgeColor::Informative,
        MemberRole::Staff => BadgeColor::Subtle,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{role.label()}</Badge> }.into_any()
}

fn status_badge(status: MemberStatus) -> AnyView {
    let color = match status {
        MemberStatus::Active => BadgeColor::Success,
        MemberStatus::Invited => BadgeColor::Informative,
        MemberStatus::Suspended => BadgeColor::Danger,
    };
    view! { <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge> }.into_any()
}

#[component]
fn MembersList() -> impl IntoView {
    let state = create_state();
    let notifier = use_notifier();
    let (auth_state, _) = use_auth();
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let (show_invite, set_show_invite) = signal(false);
    let editing: RwSignal<Option<MemberDto>> = RwSignal::new(None);
    let sort = RwSignal::new(state.with_untracked(|s| s.sort.clone()));

    let can_manage = move || {
        auth_state.with(|a| {
            a.user_info
                .as_ref()
                .map(|u| u.can_manage_members())
                .unwrap_or(false)
        })
    };

    let load_data = move || {
        set_loading.set(true);
        set_error.set(None);
        let filters = state.with_untracked(|s| s.filters.clone());
        spawn_local(async move {
            match api::fetch_members(&filters).await {
                Ok(page) => {
                    let mut refetch = false;
                    state.update(|s| {
                        let (items, stale) = s.filters.apply_response(page);
                        s.items = items;
                        s.is_loaded = true;
                        refetch = stale;
                    });
                    set_loading.set(false);
                    if refetch {
                        log::debug!("members page out of range, reloading");
                        let filters = state.with_untracked(|s| s.filters.clone());
                        if let Ok(page) = api::fetch_members(&filters).await {
                            state.update(|s| s.items = s.filters.apply_response(page).0);
                        }
                    }
                }
                Err(e) => {
                    set_error.set(Some(member_error_message(&e)));
                    set_loading.set(false);
                }
            }
        });
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data();
        }
    });

    Effect::new(move |_| {
        let current = sort.get();
        state.update(|s| s.sort = current);
    });

    let search = RwSignal::new(String::new());
    let role_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());

    let apply_filters = move || {
        state.update(|s| {
            s.filters.set(SEARCH, search.get_untracked());
            s.filters.set(ROLE, role_filter.get_untracked());
            s.filters.set(STATUS, status_filter.get_untracked());
        });
        load_data();
    };

    // Selects apply immediately; the search box waits for Enter or the button.
    Effect::new(move |prev: Option<(String, String)>| {
        let current = (role_filter.get(), status_filter.get());
        if prev.is_some() && prev.as_ref() != Some(&current) {
            apply_filters();
        }
        current
    });

    let reset_filters = move || {
        search.set(String::new());
        role_filter.set(String::new());
        status_filter.set(String::new());
        state.update(|s| s.filters.clear());
        load_data();
    };

    let go_to_page = move |page: u32| {
        state.update(|s| s.filters.set_page(page));
        load_data();
    };

    let change_page_size = move |size: u32| {
        state.update(|s| s.filters.set_limit(size));
        load_data();
    };

    let delete_member = move |member: MemberDto| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Remove {} from the organization?", member.display_name()))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_member(&member.id).await {
                Ok(()) => {
                    notifier.success(format!("{} removed", member.display_name()));
                    load_data();
                }
                Err(e) => notifier.warning(member_error_message(&e)),
            }
        });
    };

    view! {
        <PageFrame page_id="a002_member--list" category=PageCategory::List>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Members"</h1>
                    <Badge>
                        {move || state.with(|s| s.filters.pagination.total.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Show when=can_manage>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| set_show_invite.set(true)
                        >
                            {icon("plus")}
                            " Invite"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div
                                style="flex: 1; max-width: 320px;"
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        apply_filters();
                                    }
                                }
                            >
                                <Input value=search placeholder="Name or email..." />
                            </div>
                            <Select value=role_filter>
                                <option value="">"All roles"</option>
                                {MemberRole::ALL.iter().map(|r| view! {
                                    <option value=r.as_str()>{r.label()}</option>
                                }).collect_view()}
                            </Select>
                            <Select value=status_filter>
                                <option value="">"All statuses"</option>
                                {MemberStatus::ALL.iter().map(|s| view! {
                                    <option value=s.as_str()>{s.label()}</option>
                                }).collect_view()}
                            </Select>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| apply_filters()
                                disabled=Signal::derive(move || loading.get())
                            >
                                "Search"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| reset_filters()>
                                "Reset"
                            </Button>
                        </Flex>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=180.0>
                                    <SortHeader label="Name" field="name" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=180.0>
                                    <SortHeader label="Email" field="email" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortHeader label="Role" field="role" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>
                                    <SortHeader label="Status" field="status" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=110.0>
                                    <SortHeader label="Joined" field="joined_at" sort=sort />
                                </TableHeaderCell>
                                <TableHeaderCell min_width=90.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.with(|s| s.sorted_items())
                                key=|m| (m.id.clone(), m.role, m.status)
                                children=move |member| {
                                    let row = MemberRow::from(&member);
                                    let is_owner = row.is_owner;
                                    let for_edit = member.clone();
                                    let for_delete = member;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{row.name}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{row.email}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{role_badge(row.role)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{status_badge(row.status)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{row.joined}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Show when=move || can_manage() && !is_owner>
                                                    {
                                                        let for_edit = for_edit.clone();
                                                        let for_delete = for_delete.clone();
                                                        view! {
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click=move |_| editing.set(Some(for_edit.clone()))
                                                                attr:title="Edit"
                                                            >
                                                                {icon("edit")}
                                                            </Button>
                                                            <Button
                                                                appearance=ButtonAppearance::Subtle
                                                                on_click=move |_| delete_member(for_delete.clone())
                                                                attr:title="Remove"
                                                            >
                                                                {icon("trash")}
                                                            </Button>
                                                        }
                                                    }
                                                </Show>
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

                {move || show_invite.get().then(|| view! {
                    <InviteMemberForm
                        on_close=move || set_show_invite.set(false)
                        on_invited=move || {
                            set_show_invite.set(false);
                            load_data();
                        }
                    />
                })}

                {move || editing.get().map(|member| view! {
                    <EditMemberForm
                        member=member
                        on_close=move || editing.set(None)
                        on_saved=move || {
                            editing.set(None);
                            load_data();
                        }
                    />
                })}
            </div>
        </PageFrame>
    }
}
