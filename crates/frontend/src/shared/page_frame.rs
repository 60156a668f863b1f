//! PageFrame: standard root wrapper for every routed page.
//!
//! Sets `id="{entity}--{category}"` (e.g. `"a001_categories--list"`) and
//! `data-page-category` on the root element so a page can be found from
//! the DOM inspector.

use leptos::prelude::*;

/// List of records: table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Fallback pages (not found).
pub const PAGE_CAT_SYSTEM: &str = "system";

#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    #[prop(into)]
    page_id: String,
    /// One of the PAGE_CAT_* constants.
    category: &'static str,
    /// Additional CSS classes appended after the base class.
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let base_class = match category {
        PAGE_CAT_SYSTEM => "page page--system",
        _ => "page",
    };

    let full_class = if class.is_empty() {
        base_class.to_string()
    } else {
        format!("{base_class} {class}")
    };

    view! {
        <div
            id=page_id
            class=full_class
            data-page-category=category
        >
            {children()}
        </div>
    }
}
