use contracts::shared::facet::{Facet, FacetFilter};
use leptos::prelude::*;

/// Two-value facet (status, featured) over the rows of the loaded page.
#[component]
pub fn FacetFilterGroup(
    facet: Facet,
    filter: RwSignal<FacetFilter>,
    /// `(yes, no)` counts on this page
    #[prop(into)]
    counts: Signal<(usize, usize)>,
) -> impl IntoView {
    let (yes_label, no_label) = facet.value_labels();

    view! {
        <div class="facet-filter">
            <span class="facet-filter__title">
                {facet.label()}
                <span class="facet-filter__scope">" (on this page)"</span>
            </span>
            <label class="form__checkbox-wrapper">
                <input
                    type="checkbox"
                    class="form__checkbox"
                    prop:checked=move || filter.with(|f| f.selection(facet).yes)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        filter.update(|f| f.selection_mut(facet).yes = on);
                    }
                />
                <span class="form__checkbox-label">
                    {move || format!("{yes_label} ({})", counts.get().0)}
                </span>
            </label>
            <label class="form__checkbox-wrapper">
                <input
                    type="checkbox"
                    class="form__checkbox"
                    prop:checked=move || filter.with(|f| f.selection(facet).no)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        filter.update(|f| f.selection_mut(facet).no = on);
                    }
                />
                <span class="form__checkbox-label">
                    {move || format!("{no_label} ({})", counts.get().1)}
                </span>
            </label>
        </div>
    }
}
