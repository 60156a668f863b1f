use crate::shared::icons::icon;
use contracts::domain::common::PageMeta;
use leptos::prelude::*;

/// Server-side pagination: first/prev/next/last, range label and page size.
///
/// Pages are 1-based, matching `meta.current_page`.
#[component]
pub fn PaginationControls(
    /// `None` until the first page has loaded
    #[prop(into)]
    meta: Signal<Option<PageMeta>>,

    /// Current page size from the URL
    #[prop(into)]
    page_size: Signal<u32>,

    on_page_change: Callback<u32>,

    on_page_size_change: Callback<u32>,

    page_size_options: Vec<u32>,
) -> impl IntoView {
    let current = move || meta.get().map_or(1, |m| m.current_page);
    let last = move || meta.get().map_or(1, |m| m.last_page.max(1));
    let has_prev = move || meta.get().is_some_and(|m| m.has_prev());
    let has_next = move || meta.get().is_some_and(|m| m.has_next());

    view! {
        <div class="pagination-controls">
            <span class="pagination-range">
                {move || meta.get().map(|m| m.range_label()).unwrap_or_default()}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=move || !has_prev()
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if has_prev() {
                        on_page_change.run(current() - 1);
                    }
                }
                disabled=move || !has_prev()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("Page {} of {}", current(), last())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if has_next() {
                        on_page_change.run(current() + 1);
                    }
                }
                disabled=move || !has_next()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(last())
                disabled=move || !has_next()
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(val) = event_target_value(&ev).parse::<u32>() {
                        on_page_size_change.run(val);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options.iter().map(|&size| {
                    view! {
                        <option value=size.to_string() selected=move || page_size.get() == size>
                            {format!("{size} / page")}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
