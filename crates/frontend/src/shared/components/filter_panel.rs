use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter panel; the header row carries the pagination controls.
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Pagination controls (children/slot)
    #[prop(into)]
    pagination_controls: ViewFn,

    /// Filter content (form fields)
    #[prop(into)]
    filter_content: ViewFn,

    /// Active filter chips
    #[prop(optional, into)]
    filter_tags: Option<ViewFn>,

    /// Clears search and every entity filter
    #[prop(optional)]
    on_clear: Option<Callback<()>>,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=toggle_expanded
                >
                    <svg
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class=move || {
                            if is_expanded.get() {
                                "filter-panel__chevron filter-panel__chevron--expanded"
                            } else {
                                "filter-panel__chevron"
                            }
                        }
                    >
                        <polyline points="6 9 12 15 18 9"></polyline>
                    </svg>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_filters_count.get();
                        if count > 0 {
                            view! {
                                <span class="badge badge--primary">{count}</span>
                            }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>
                {on_clear.map(|on_clear| view! {
                    <button
                        class="filter-panel__clear"
                        disabled=move || active_filters_count.get() == 0
                        on:click=move |_| on_clear.run(())
                    >
                        "Clear filters"
                    </button>
                })}
                <div class="filter-panel-header__center">
                    {pagination_controls.run()}
                </div>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {filter_content.run()}
                    {filter_tags.as_ref().map(|tags| view! {
                        <div class="filter-panel__tags">{tags.run()}</div>
                    })}
                </div>
            </div>
        </div>
    }
}

/// Removable chip for one active filter
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                title="Remove filter"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
