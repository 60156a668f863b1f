//! Searchable single-select.
//!
//! `Combobox` filters a static or prefetched option list as the user
//! types. `DropdownCombobox` loads its options from `/{resource}/dropdown`
//! once per session through the query cache.

use crate::shared::crud::fetch_dropdown;
use crate::shared::query_client::use_cached_query;
use contracts::domain::common::dropdown::to_options;
use contracts::shared::combobox::{filter_options, find_label, ComboOption};
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Combobox(
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] options: Signal<Vec<ComboOption>>,
    /// Selected option value; empty means nothing selected
    #[prop(into)]
    value: Signal<String>,
    /// `None` when cleared
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] loading: MaybeProp<bool>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(optional, into)] error: MaybeProp<String>,
    /// Server-side search: called with the typed text instead of filtering locally
    #[prop(optional)]
    on_search: Option<Callback<String>>,
) -> impl IntoView {
    let open = RwSignal::new(false);
    let text = RwSignal::new(String::new());

    let selected_label = move || {
        let v = value.get();
        if v.is_empty() {
            return String::new();
        }
        options.with(|opts| find_label(opts, &v).map(str::to_string).unwrap_or_default())
    };

    let visible = Memo::new(move |_| {
        options.with(|opts| {
            if on_search.is_some() {
                opts.clone()
            } else {
                text.with(|t| filter_options(opts, t).into_iter().cloned().collect())
            }
        })
    });

    let select = move |opt: Option<String>| {
        on_change.run(opt);
        open.set(false);
        text.set(String::new());
    };

    let on_keydown = move |ev: ev::KeyboardEvent| match ev.key().as_str() {
        "Escape" => {
            // keep the surrounding dialog open
            ev.stop_propagation();
            open.set(false);
        }
        "Enter" => {
            ev.prevent_default();
            if let Some(first) = visible.with_untracked(|v| v.first().cloned()) {
                select(Some(first.value));
            }
        }
        _ => {}
    };

    view! {
        <div class="form__group combobox">
            {move || label.get().map(|l| view! { <label class="form__label">{l}</label> })}
            <div class="combobox__control">
                <input
                    class=move || {
                        if error.get().is_some() {
                            "form__input combobox__input form__input--invalid"
                        } else {
                            "form__input combobox__input"
                        }
                    }
                    prop:value=move || if open.get() { text.get() } else { selected_label() }
                    placeholder=move || placeholder.get().unwrap_or_else(|| "Select...".to_string())
                    disabled=move || disabled.get().unwrap_or(false)
                    on:focus=move |_| {
                        text.set(String::new());
                        open.set(true);
                    }
                    on:blur=move |_| open.set(false)
                    on:input=move |ev| {
                        let typed = event_target_value(&ev);
                        if let Some(search) = on_search {
                            search.run(typed.clone());
                        }
                        text.set(typed);
                        open.set(true);
                    }
                    on:keydown=on_keydown
                />
                <Show when=move || !value.get().is_empty() && !disabled.get().unwrap_or(false)>
                    <button
                        class="combobox__clear"
                        title="Clear"
                        on:mousedown=move |ev| {
                            ev.prevent_default();
                            select(None);
                        }
                    >
                        "×"
                    </button>
                </Show>
            </div>
            <Show when=move || open.get()>
                <ul class="combobox__list" role="listbox">
                    {move || {
                        if loading.get().unwrap_or(false) {
                            return view! { <li class="combobox__empty">"Loading..."</li> }.into_any();
                        }
                        let items = visible.get();
                        if items.is_empty() {
                            return view! { <li class="combobox__empty">"No results"</li> }.into_any();
                        }
                        items.into_iter().map(|opt| {
                            let current = opt.value.clone();
                            let is_selected = move || value.get() == current;
                            let picked = opt.value.clone();
                            view! {
                                <li
                                    class="combobox__option"
                                    class:combobox__option--selected=is_selected
                                    on:mousedown=move |ev| {
                                        // keep focus so blur does not close first
                                        ev.prevent_default();
                                        select(Some(picked.clone()));
                                    }
                                >
                                    <span>{opt.label}</span>
                                    {opt.hint.map(|h| view! { <span class="combobox__hint">{h}</span> })}
                                </li>
                            }
                        }).collect_view().into_any()
                    }}
                </ul>
            </Show>
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}

/// Combobox over `/{resource}/dropdown` (brands, taxes, warehouses, units...).
#[component]
pub fn DropdownCombobox(
    /// REST resource, also the cache entity
    resource: &'static str,
    #[prop(optional, into)] label: MaybeProp<String>,
    #[prop(into)] value: Signal<String>,
    on_change: Callback<Option<String>>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let options = use_dropdown_options(resource);

    view! {
        <Combobox
            label=label
            options=options.0
            value=value
            on_change=on_change
            placeholder=placeholder
            loading=options.1
            error=error
            disabled=disabled
        />
    }
}

/// Options of `/{resource}/dropdown` and their loading flag.
///
/// A failed load leaves the list empty; the picker stays usable.
pub fn use_dropdown_options(resource: &'static str) -> (Signal<Vec<ComboOption>>, Signal<bool>) {
    let state = use_cached_query(
        resource,
        Signal::stored("dropdown".to_string()),
        move |_key: String| async move {
            fetch_dropdown(resource).await.map(|items| to_options(&items))
        },
    );
    let data = state.data;
    (
        Signal::derive(move || data.get().unwrap_or_default()),
        state.loading,
    )
}
