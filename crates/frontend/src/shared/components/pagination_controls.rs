use crate::shared::config::PAGE_SIZE_OPTIONS;
use crate::shared::icons::icon;
use crate::shared::pagination::{clamp_page, page_window, PageMarker};
use contracts::shared::pagination::PaginationState;
use leptos::prelude::*;

/// Numbered pagination bar with a page-size selector.
///
/// Renders nothing but the summary when there is a single page.
#[component]
pub fn PaginationControls(
    #[prop(into)] state: Signal<PaginationState>,
    /// 1-based page requested by the user
    on_page_change: Callback<u32>,
    on_page_size_change: Callback<u32>,
) -> impl IntoView {
    let go = move |page: u32| {
        let s = state.get_untracked();
        let page = clamp_page(page, s.pages);
        if page != s.page {
            on_page_change.run(page);
        }
    };

    let summary = move || {
        let s = state.get();
        match s.visible_range() {
            Some((from, to)) => format!("{}–{} of {}", from, to, s.total),
            None => "No records".to_string(),
        }
    };

    let markers = move || {
        let s = state.get();
        page_window(clamp_page(s.page, s.pages), s.pages)
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Page(n) => view! {
                    <button
                        class="pagination-btn"
                        class:pagination-btn--active=move || state.get().page == n
                        on:click=move |_| go(n)
                    >
                        {n.to_string()}
                    </button>
                }
                .into_any(),
                PageMarker::Ellipsis => view! { <span class="pagination-ellipsis">"…"</span> }.into_any(),
            })
            .collect_view()
    };

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">{summary}</span>
            <button
                class="pagination-btn"
                on:click=move |_| go(state.get_untracked().page.saturating_sub(1))
                disabled=move || !state.get().has_prev()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {markers}
            <button
                class="pagination-btn"
                on:click=move |_| go(state.get_untracked().page + 1)
                disabled=move || !state.get().has_next()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || state.get().limit.to_string()
            >
                {PAGE_SIZE_OPTIONS.iter().map(|&size| {
                    view! {
                        <option value=size.to_string() selected=move || state.get().limit == size>
                            {format!("{} / page", size)}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
