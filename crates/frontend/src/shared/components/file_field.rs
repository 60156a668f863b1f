//! File input for multipart forms (category image, product image/file).

use crate::shared::icons::icon;
use leptos::html;
use leptos::prelude::*;

/// The file currently picked in `input`, if any.
pub fn selected_file(input: NodeRef<html::Input>) -> Option<web_sys::File> {
    input
        .get_untracked()
        .and_then(|el| el.files())
        .and_then(|files| files.get(0))
}

pub fn clear_input(input: NodeRef<html::Input>) {
    if let Some(el) = input.get_untracked() {
        el.set_value("");
    }
}

#[component]
pub fn FileField(
    #[prop(into)] label: String,
    /// `accept` attribute, e.g. `image/*`
    #[prop(optional)]
    accept: &'static str,
    input: NodeRef<html::Input>,
    /// Name of the picked file, kept in sync by this component
    picked: RwSignal<Option<String>>,
    /// URL or name of the file already stored on the record
    #[prop(optional, into)]
    existing: Signal<Option<String>>,
    /// Show the stored file as an image
    #[prop(optional)]
    image_preview: bool,
    /// Marks the stored file for removal
    #[prop(optional)]
    on_remove_existing: Option<Callback<()>>,
    #[prop(optional, into)] error: MaybeProp<String>,
) -> impl IntoView {
    let removed = RwSignal::new(false);

    view! {
        <div class="form__group file-field">
            <label class="form__label">{label}</label>
            {move || {
                let stored = existing.get().filter(|_| !removed.get() && picked.with(Option::is_none))?;
                Some(view! {
                    <div class="file-field__existing">
                        {if image_preview {
                            view! { <img class="file-field__preview" src=stored.clone() alt="" /> }.into_any()
                        } else {
                            view! { <span class="file-field__name">{stored.clone()}</span> }.into_any()
                        }}
                        {on_remove_existing.map(|on_remove| view! {
                            <button
                                type="button"
                                class="button button--icon button--icon-danger"
                                title="Remove"
                                on:click=move |_| {
                                    removed.set(true);
                                    on_remove.run(());
                                }
                            >
                                {icon("trash")}
                            </button>
                        })}
                    </div>
                })
            }}
            <div class="file-field__control">
                <input
                    type="file"
                    class="form__input"
                    accept=accept
                    node_ref=input
                    on:change=move |_| picked.set(selected_file(input).map(|f| f.name()))
                />
                <Show when=move || picked.with(Option::is_some)>
                    <button
                        type="button"
                        class="button button--icon"
                        title="Clear"
                        on:click=move |_| {
                            clear_input(input);
                            picked.set(None);
                        }
                    >
                        {icon("x")}
                    </button>
                </Show>
            </div>
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}
