use super::view_model::CategoryDetailsViewModel;
use crate::domain::a001_category::ui::picker::{use_category_tree, CategoryPicker};
use crate::shared::components::file_field::{clear_input, selected_file};
use crate::shared::components::ui::{Checkbox, Input, Textarea};
use crate::shared::components::FileField;
use crate::shared::dialog::shell::DialogShell;
use crate::shared::dialog::use_dialog;
use contracts::domain::a001_category::{Category, CategoryForm};
use contracts::shared::dialog_state::DialogKind;
use leptos::html;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn CategoryDetails() -> impl IntoView {
    let dialog = use_dialog::<Category>();
    let vm = CategoryDetailsViewModel::new();
    let submit = vm.submit;
    let (tree, _) = use_category_tree();

    let image_input = NodeRef::<html::Input>::new();
    let picked_image = RwSignal::new(None::<String>);

    let open = Signal::derive(move || dialog.is_open(DialogKind::Add) || dialog.is_open(DialogKind::Edit));

    Effect::new(move |was_open: Option<bool>| {
        let now = open.get();
        if now && was_open != Some(true) {
            vm.reset(dialog.current_row_untracked());
            clear_input(image_input);
            picked_image.set(None);
        }
        now
    });

    let field = move |f: fn(&CategoryForm) -> String| Signal::derive(move || vm.form.with(f));
    let flag = move |f: fn(&CategoryForm) -> bool| Signal::derive(move || vm.form.with(f));

    let save = move || {
        let file = selected_file(image_input);
        tree.with_untracked(|t| vm.save_command(dialog, t.as_ref(), file));
    };

    let on_close = Callback::new(move |_| {
        if !submit.submitting.get_untracked() {
            dialog.close();
        }
    });

    view! {
        <DialogShell
            open=open
            title=Signal::derive(move || vm.title())
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || submit.submitting.get())
                    on_click=move |_| save()
                >
                    {move || match (submit.submitting.get(), vm.is_edit_mode()) {
                        (true, _) => "Saving...",
                        (false, true) => "Save changes",
                        (false, false) => "Create",
                    }}
                </Button>
            }
        >
            <form
                class="details-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    save();
                }
            >
                <div class="form__row">
                    <Input
                        label="Name"
                        value=field(|f| f.name.clone())
                        on_input=Callback::new(move |v: String| vm.set_name(v))
                        placeholder="e.g. Beverages"
                        required=true
                        error=submit.error_for("name")
                    />
                    <Input
                        label="Slug"
                        value=field(|f| f.slug.clone())
                        on_input=Callback::new(move |v: String| vm.set_slug(v))
                        placeholder="beverages"
                        error=submit.error_for("slug")
                    />
                </div>

                <CategoryPicker
                    label="Parent category"
                    value=field(|f| f.parent_id.clone())
                    on_change=Callback::new(move |v: Option<String>| {
                        vm.form.update(|f| f.parent_id = v.unwrap_or_default());
                        submit.clear_field("parent_id");
                    })
                    exclude=Signal::derive(move || vm.editing.with(|e| e.as_ref().map(|c| c.id.0)))
                    placeholder="None (root category)"
                    error=submit.error_for("parent_id")
                />

                <FileField
                    label="Image"
                    accept="image/*"
                    input=image_input
                    picked=picked_image
                    existing=Signal::derive(move || vm.existing_image())
                    image_preview=true
                    on_remove_existing=Callback::new(move |_| vm.form.update(|f| f.remove_image = true))
                    error=submit.error_for("image")
                />

                <div class="form__row form__row--checkboxes">
                    <Checkbox
                        label="Active"
                        checked=flag(|f| f.is_active)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_active = v))
                    />
                    <Checkbox
                        label="Featured"
                        checked=flag(|f| f.featured)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.featured = v))
                    />
                    <Checkbox
                        label="Disable sync"
                        checked=flag(|f| f.is_sync_disable)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_sync_disable = v))
                    />
                </div>

                <Input
                    label="Page title"
                    value=field(|f| f.page_title.clone())
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.page_title = v);
                        submit.clear_field("page_title");
                    })
                    error=submit.error_for("page_title")
                />
                <Textarea
                    label="Short description"
                    value=field(|f| f.short_description.clone())
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.short_description = v);
                        submit.clear_field("short_description");
                    })
                    rows=3
                    error=submit.error_for("short_description")
                />
            </form>
        </DialogShell>
    }
}
