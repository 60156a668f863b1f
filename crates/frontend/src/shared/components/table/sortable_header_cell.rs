//! Header cell that drives server-side sorting through the URL.
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Name"
//!     sort_field="name"
//!     sort=Signal::derive(move || list.query.with(|q| q.sort.clone()))
//!     on_sort=Callback::new(move |field: String| list.toggle_sort(&field))
//! />
//! ```

use contracts::shared::list_query::{Sort, SortDir};
use leptos::prelude::*;
use thaw::*;

fn sort_indicator(sort: Option<&Sort>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.by == field => match s.dir {
            SortDir::Asc => " ▲",
            SortDir::Desc => " ▼",
        },
        _ => " ⇅",
    }
}

fn sort_class(sort: Option<&Sort>, field: &str) -> &'static str {
    if sort.is_some_and(|s| s.by == field) {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Clicking cycles unsorted, ascending, descending; the list refetches.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    /// Backend column name sent as `sort_by`
    sort_field: &'static str,

    #[prop(into)]
    sort: Signal<Option<Sort>>,

    on_sort: Callback<String>,

    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// `left` or `right`
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=true min_width=min_width class="resizable">
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(sort_field.to_string())
            >
                {label}
                <span class=move || sort.with(|s| sort_class(s.as_ref(), sort_field))>
                    {move || sort.with(|s| sort_indicator(s.as_ref(), sort_field))}
                </span>
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_follows_sort() {
        let sort = Sort {
            by: "name".to_string(),
            dir: SortDir::Desc,
        };
        assert_eq!(sort_indicator(Some(&sort), "name"), " ▼");
        assert_eq!(sort_indicator(Some(&sort), "code"), " ⇅");
        assert_eq!(sort_indicator(None, "name"), " ⇅");
    }
}
