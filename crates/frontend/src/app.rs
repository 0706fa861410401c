use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::notify::Notifier;
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Current organization/event selection for the whole app.
    provide_context(AppGlobalContext::new());

    provide_context(Notifier::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
