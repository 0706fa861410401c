use leptos::prelude::*;

/// Title row of a section page; children render as right-aligned actions.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    /// Usually the current event or organization name
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header page-header">
            <div class="page-header__text">
                <h1 class="page-header__title">{title}</h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page-header__subtitle">{s}</div>
                })}
            </div>
            <div class="page-header__actions">
                {children.map(|c| c())}
            </div>
        </div>
    }
}
