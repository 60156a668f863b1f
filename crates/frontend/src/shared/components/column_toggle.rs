use crate::shared::icons::icon;
use contracts::shared::export::ColumnDef;
use leptos::prelude::*;
use std::collections::BTreeSet;

pub fn default_visible(defs: &[ColumnDef]) -> BTreeSet<&'static str> {
    defs.iter()
        .filter(|d| d.default_visible)
        .map(|d| d.key)
        .collect()
}

/// Show/hide table columns for the current page visit.
#[component]
pub fn ColumnToggle(
    columns: &'static [ColumnDef],
    visible: RwSignal<BTreeSet<&'static str>>,
) -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <div class="column-toggle">
            <button
                class="button button--secondary button--small"
                on:click=move |_| open.update(|o| *o = !*o)
                title="Columns"
            >
                {icon("columns")}
                " Columns"
            </button>
            <Show when=move || open.get()>
                <div class="column-toggle__menu" on:mouseleave=move |_| open.set(false)>
                    {columns.iter().map(|def| {
                        let key = def.key;
                        view! {
                            <label class="form__checkbox-wrapper">
                                <input
                                    type="checkbox"
                                    class="form__checkbox"
                                    prop:checked=move || visible.with(|v| v.contains(key))
                                    on:change=move |ev| {
                                        let on = event_target_checked(&ev);
                                        visible.update(|v| {
                                            if on {
                                                v.insert(key);
                                            } else {
                                                v.remove(key);
                                            }
                                        });
                                    }
                                />
                                <span class="form__checkbox-label">{def.label}</span>
                            </label>
                        }
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_visible() {
        const DEFS: &[ColumnDef] = &[
            ColumnDef::new("name", "Name"),
            ColumnDef::new("slug", "Slug").hidden(),
        ];
        let visible = default_visible(DEFS);
        assert!(visible.contains("name"));
        assert!(!visible.contains("slug"));
    }
}
