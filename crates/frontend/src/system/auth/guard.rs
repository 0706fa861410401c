use contracts::domain::a002_member::aggregate::MemberRole;
use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires one of the given organization roles
/// Shows an access-denied panel otherwise
#[component]
pub fn RequireRole(
    #[prop(into)] roles: Vec<MemberRole>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let roles = StoredValue::new(roles);

    view! {
        <Show
            when=move || {
                let state = auth_state.get();
                state.is_authenticated() && roles.with_value(|r| state.has_role(r))
            }
            fallback=|| view! {
                <div class="access-denied">
                    <h3>"Access denied"</h3>
                    <p>"Your role in this organization does not allow this section."</p>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
