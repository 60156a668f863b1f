use leptos::prelude::*;
use std::collections::BTreeSet;
use thaw::*;

/// Row selection checkbox; the click does not reach the row.
#[component]
pub fn TableCellCheckbox(
    item_id: i64,

    #[prop(into)]
    selected: Signal<BTreeSet<i64>>,

    /// `(item_id, checked)`
    on_change: Callback<(i64, bool)>,
) -> impl IntoView {
    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.with(|s| s.contains(&item_id))
                on:change=move |ev| {
                    on_change.run((item_id, event_target_checked(&ev)));
                }
            />
        </TableCell>
    }
}
