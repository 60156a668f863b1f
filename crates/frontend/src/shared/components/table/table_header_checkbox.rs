//! Select-all checkbox over the rows currently shown.

use leptos::prelude::*;
use std::collections::BTreeSet;
use thaw::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(visible: &[i64], selected: &BTreeSet<i64>) -> CheckboxState {
    if visible.is_empty() {
        return CheckboxState::Unchecked;
    }
    let count = visible.iter().filter(|id| selected.contains(id)).count();
    if count == 0 {
        CheckboxState::Unchecked
    } else if count == visible.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[component]
pub fn TableHeaderCheckbox(
    /// Ids of the visible rows
    #[prop(into)]
    items: Signal<Vec<i64>>,

    #[prop(into)]
    selected: Signal<BTreeSet<i64>>,

    /// true = select all visible, false = clear them
    on_change: Callback<bool>,
) -> impl IntoView {
    let state = Signal::derive(move || {
        items.with(|ids| selected.with(|sel| checkbox_state(ids, sel)))
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // indeterminate is a DOM property only
    Effect::new(move |_| {
        let indeterminate = state.get() == CheckboxState::Indeterminate;
        if let Some(input) = checkbox_ref.get() {
            input.set_indeterminate(indeterminate);
        }
    });

    view! {
        <TableHeaderCell resizable=false class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == CheckboxState::Checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_states() {
        let selected: BTreeSet<i64> = [1, 2].into_iter().collect();
        assert_eq!(checkbox_state(&[], &selected), CheckboxState::Unchecked);
        assert_eq!(checkbox_state(&[1, 2], &selected), CheckboxState::Checked);
        assert_eq!(checkbox_state(&[1, 3], &selected), CheckboxState::Indeterminate);
        assert_eq!(checkbox_state(&[3], &selected), CheckboxState::Unchecked);
    }
}
