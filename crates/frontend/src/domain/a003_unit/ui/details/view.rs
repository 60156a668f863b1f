use super::view_model::{conversion_preview, UnitDetailsViewModel};
use crate::domain::a003_unit::ui::picker::{use_base_units, BaseUnitPicker};
use crate::shared::components::ui::{Checkbox, Input, Select};
use crate::shared::dialog::shell::DialogShell;
use crate::shared::dialog::use_dialog;
use contracts::domain::a003_unit::{Unit, UnitOperator};
use contracts::shared::combobox::{options, parse_selection};
use contracts::shared::dialog_state::DialogKind;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn UnitDetails() -> impl IntoView {
    let dialog = use_dialog::<Unit>();
    let vm = UnitDetailsViewModel::new();
    let submit = vm.submit;
    let (base_units, _) = use_base_units();

    let open = Signal::derive(move || dialog.is_open(DialogKind::Add) || dialog.is_open(DialogKind::Edit));

    Effect::new(move |was_open: Option<bool>| {
        let now = open.get();
        if now && was_open != Some(true) {
            vm.reset(dialog.current_row_untracked());
        }
        now
    });

    let field = move |f: fn(&contracts::domain::a003_unit::UnitForm) -> String| {
        Signal::derive(move || vm.form.with(f))
    };
    let has_base = Signal::derive(move || vm.form.with(|f| parse_selection(&f.base_unit).is_some()));
    let operator_options = Signal::derive(|| {
        options::<UnitOperator>()
            .into_iter()
            .map(|o| (o.value, o.label))
            .collect::<Vec<_>>()
    });
    let preview = move || {
        let base_name = vm.form.with(|f| {
            let id = parse_selection(&f.base_unit)?;
            base_units.with(|units| units.iter().find(|u| u.id.0 == id).map(|u| u.name.clone()))
        });
        vm.form.with(|f| conversion_preview(f, base_name.as_deref()))
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
                    on_click=move |_| vm.save_command(dialog)
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
                    vm.save_command(dialog);
                }
            >
                <div class="form__row">
                    <Input
                        label="Code"
                        value=field(|f| f.code.clone())
                        on_input=Callback::new(move |v: String| {
                            vm.form.update(|f| f.code = v);
                            submit.clear_field("code");
                        })
                        placeholder="e.g. pc"
                        required=true
                        error=submit.error_for("code")
                    />
                    <Input
                        label="Name"
                        value=field(|f| f.name.clone())
                        on_input=Callback::new(move |v: String| {
                            vm.form.update(|f| f.name = v);
                            submit.clear_field("name");
                        })
                        placeholder="e.g. Piece"
                        required=true
                        error=submit.error_for("name")
                    />
                </div>

                <BaseUnitPicker
                    label="Base unit"
                    value=field(|f| f.base_unit.clone())
                    on_change=Callback::new(move |v: Option<String>| vm.set_base_unit(v))
                    exclude=Signal::derive(move || vm.editing.with(|e| e.as_ref().map(|u| u.id.0)))
                    placeholder="None (this is a base unit)"
                    error=submit.error_for("base_unit")
                />

                <Show when=move || has_base.get()>
                    <div class="form__row">
                        <Select
                            label="Operator"
                            value=field(|f| f.operator.clone())
                            on_change=Callback::new(move |v: String| vm.form.update(|f| f.operator = v))
                            options=operator_options
                            error=submit.error_for("operator")
                        />
                        <Input
                            label="Operation value"
                            input_type="number"
                            value=field(|f| f.operation_value.clone())
                            on_input=Callback::new(move |v: String| {
                                vm.form.update(|f| f.operation_value = v);
                                submit.clear_field("operation_value");
                            })
                            placeholder="e.g. 12"
                            error=submit.error_for("operation_value")
                        />
                    </div>
                    {move || preview().map(|text| view! { <p class="form__hint">{text}</p> })}
                </Show>

                <Checkbox
                    label="Active"
                    checked=Signal::derive(move || vm.form.with(|f| f.is_active))
                    on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_active = v))
                />
            </form>
        </DialogShell>
    }
}
