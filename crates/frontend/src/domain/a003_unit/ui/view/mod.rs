use crate::shared::components::ui::ActiveBadge;
use crate::shared::config::permissions;
use crate::shared::dialog::shell::DialogShell;
use crate::shared::dialog::use_dialog;
use contracts::domain::a003_unit::Unit;
use contracts::domain::common::serde_helpers::quantity;
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::StaticOptions;
use contracts::shared::dialog_state::DialogKind;
use contracts::shared::permissions::Action;
use leptos::prelude::*;
use thaw::*;

/// Read-only details of the current row.
#[component]
pub fn UnitView() -> impl IntoView {
    let dialog = use_dialog::<Unit>();
    let open = dialog.is_open_signal(DialogKind::View);
    let can_edit = permissions().can(Unit::collection_name(), Action::Edit);
    let on_close = Callback::new(move |_| dialog.close());

    view! {
        <DialogShell
            open=open
            title=Signal::derive(move || {
                dialog.current_row().map(|u| u.name).unwrap_or_else(|| "Unit".to_string())
            })
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
                {can_edit.then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| dialog.open(DialogKind::Edit, dialog.current_row_untracked())
                    >
                        "Edit"
                    </Button>
                })}
            }
        >
            {move || dialog.current_row().map(|unit| {
                let conversion = unit.conversion_label(None);
                view! {
                    <dl class="details-list">
                        <dt>"Code"</dt>
                        <dd>{unit.code.clone()}</dd>
                        <dt>"Name"</dt>
                        <dd>{unit.name.clone()}</dd>
                        <dt>"Base unit"</dt>
                        <dd>{unit.base_unit_name.clone().unwrap_or_else(|| "None (base unit)".to_string())}</dd>
                        {(!unit.is_base()).then(|| view! {
                            <dt>"Operator"</dt>
                            <dd>{unit.operator.map(|o| o.label()).unwrap_or_default()}</dd>
                            <dt>"Operation value"</dt>
                            <dd>{unit.operation_value.map(quantity).unwrap_or_default()}</dd>
                        })}
                        {(!conversion.is_empty()).then(|| view! {
                            <dt>"Conversion"</dt>
                            <dd>{conversion}</dd>
                        })}
                        <dt>"Status"</dt>
                        <dd><ActiveBadge active=unit.is_active /></dd>
                        <dt>"Created"</dt>
                        <dd>{unit.metadata.created_display()}</dd>
                        <dt>"Updated"</dt>
                        <dd>{unit.metadata.updated_display()}</dd>
                    </dl>
                }
            })}
        </DialogShell>
    }
}
