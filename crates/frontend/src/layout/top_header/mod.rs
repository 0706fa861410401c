//! Top header: brand, organization/event selectors, user and logout.

use crate::domain::a001_organization::api;
use crate::layout::global_context::{use_global_context, AppGlobalContext};
use crate::shared::icons::icon;
use crate::shared::notify::{use_notifier, Notifier};
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Fetch the admin's organizations into the global context.
pub fn reload_organizations(ctx: AppGlobalContext, notifier: Notifier) {
    spawn_local(async move {
        match api::fetch_my_organizations().await {
            Ok(orgs) => {
                log::debug!("loaded {} organizations", orgs.len());
                ctx.set_organizations(orgs);
            }
            Err(e) => notifier.error(&e),
        }
    });
}

fn option_value(id: Option<String>) -> String {
    id.unwrap_or_default()
}

fn selected_id(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let notifier = use_notifier();
    let (auth_state, set_auth_state) = use_auth();

    reload_organizations(ctx, notifier);

    // Events follow the chosen organization
    Effect::new(move |_| {
        let Some(org_id) = ctx.current_org_id() else {
            return;
        };
        spawn_local(async move {
            match api::fetch_events(&org_id).await {
                Ok(events) => {
                    // The admin may have switched again meanwhile
                    if ctx.current_org_id_untracked().as_deref() == Some(org_id.as_str()) {
                        ctx.set_events(events);
                    }
                }
                Err(e) => notifier.error(&e),
            }
        });
    });

    let logout = move |_| {
        spawn_local(async move {
            do_logout(set_auth_state).await;
        });
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"EventDesk"</span>
            </div>

            <div class="top-header__selectors">
                <label class="top-header__selector">
                    {icon("building")}
                    <select
                        prop:value=move || option_value(ctx.current_org_id())
                        on:change=move |ev| ctx.set_current_org(selected_id(event_target_value(&ev)))
                        disabled=move || ctx.organizations.with(|o| o.is_empty())
                    >
                        <Show when=move || ctx.organizations.with(|o| o.is_empty())>
                            <option value="">"No organization yet"</option>
                        </Show>
                        <For
                            each=move || ctx.organizations.get()
                            key=|org| org.id.clone()
                            children=move |org| view! {
                                <option value=org.id.clone()>{org.name.clone()}</option>
                            }
                        />
                    </select>
                </label>

                <label class="top-header__selector">
                    {icon("calendar")}
                    <select
                        prop:value=move || option_value(ctx.current_event_id())
                        on:change=move |ev| ctx.set_current_event(selected_id(event_target_value(&ev)))
                        disabled=move || ctx.events.with(|e| e.is_empty())
                    >
                        <option value="">"Select event"</option>
                        <For
                            each=move || ctx.events.get()
                            key=|event| event.id.clone()
                            children=move |event| view! {
                                <option value=event.id.clone()>{event.name.clone()}</option>
                            }
                        />
                    </select>
                </label>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user_info
                                .as_ref()
                                .map(|u| u.display_name().to_string())
                                .unwrap_or_default()
                        })}
                    </span>
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_option_means_no_selection() {
        assert_eq!(selected_id(String::new()), None);
        assert_eq!(selected_id("org-1".to_string()), Some("org-1".to_string()));
        assert_eq!(option_value(None), "");
    }
}
