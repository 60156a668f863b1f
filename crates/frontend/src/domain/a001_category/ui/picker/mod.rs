use crate::domain::a001_category::api;
use crate::shared::components::Combobox;
use crate::shared::query_client::use_cached_query;
use contracts::domain::a001_category::{Category, CategoryTree};
use contracts::domain::common::dropdown::to_options;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

/// The category tree; refetched whenever categories change.
pub fn use_category_tree() -> (Signal<Option<CategoryTree>>, Signal<bool>) {
    let state = use_cached_query(
        Category::collection_name(),
        Signal::stored("tree".to_string()),
        |_key: String| api::fetch_tree(),
    );
    (state.data, state.loading)
}

/// Category picker labelled with ancestor paths.
///
/// With `exclude` set (editing a category) that category and its whole
/// subtree are left out, so no cycle can be picked.
#[component]
pub fn CategoryPicker(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] exclude: Signal<Option<i64>>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
) -> impl IntoView {
    let (tree, loading) = use_category_tree();
    let options = Signal::derive(move || {
        tree.with(|t| {
            t.as_ref()
                .map(|t| t.parent_options(exclude.get()))
                .unwrap_or_default()
        })
    });

    view! {
        <Combobox
            label=label
            options=options
            value=value
            on_change=on_change
            loading=loading
            error=error
            placeholder=placeholder
        />
    }
}

/// Filter picker over `/categories/parents`.
#[component]
pub fn ParentCategoryFilter(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<Option<String>>,
) -> impl IntoView {
    let state = use_cached_query(
        Category::collection_name(),
        Signal::stored("parents".to_string()),
        |_key: String| async { api::fetch_parents().await.map(|items| to_options(&items)) },
    );
    let data = state.data;
    let options = Signal::derive(move || data.get().unwrap_or_default());

    view! {
        <Combobox
            label="Parent"
            options=options
            value=value
            on_change=on_change
            loading=state.loading
            placeholder="All categories"
        />
    }
}
