use contracts::domain::a002_member::aggregate::MemberRole;
use contracts::shared::api::ApiResult;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// Session restore from localStorage still running.
    pub restoring: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn has_role(&self, allowed: &[MemberRole]) -> bool {
        self.user_info
            .as_ref()
            .map(|u| u.has_role(allowed))
            .unwrap_or(false)
    }
}

/// Validate the stored access token, refreshing it once if the server rejects it.
async fn restore_session() -> Option<AuthState> {
    storage::get_access_token()?;

    if let Ok(user_info) = api::get_current_user().await {
        return Some(AuthState {
            access_token: storage::get_access_token(),
            user_info: Some(user_info),
            restoring: false,
        });
    }

    let refresh_token = storage::get_refresh_token()?;
    match api::refresh_token(refresh_token).await {
        Ok(response) => {
            storage::save_access_token(&response.access_token);
            let user_info = api::get_current_user().await.ok()?;
            Some(AuthState {
                access_token: Some(response.access_token),
                user_info: Some(user_info),
                restoring: false,
            })
        }
        Err(e) => {
            log::info!("session refresh failed: {}", e);
            None
        }
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: storage::get_access_token().is_some(),
        ..AuthState::default()
    });

    // Try to restore session from localStorage on mount
    Effect::new(move |_| {
        if !auth_state.get_untracked().restoring {
            return;
        }
        spawn_local(async move {
            match restore_session().await {
                Some(state) => set_auth_state.set(state),
                None => {
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Helper: Perform login and publish the new session
pub async fn do_login(
    email: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> ApiResult<()> {
    let response = api::login(email, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);
    log::info!("signed in as {}", response.user.email);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
        restoring: false,
    });
    Ok(())
}

/// Helper: Perform logout
///
/// Local state is cleared even if the server call fails.
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::get_refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("logout request failed: {}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
