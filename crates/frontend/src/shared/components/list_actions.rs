use crate::shared::config::permissions;
use crate::shared::dialog::DialogContext;
use crate::shared::icons::icon;
use contracts::domain::common::AggregateRoot;
use contracts::shared::dialog_state::DialogKind;
use contracts::shared::permissions::Action;
use leptos::prelude::*;
use std::collections::BTreeSet;
use thaw::*;

/// Page-level actions of an entity list: add, import, export and the
/// bulk delete of the selected rows. Only granted actions render.
#[component]
pub fn ListActions<T>(
    dialog: DialogContext<T>,
    selection: RwSignal<BTreeSet<i64>>,
) -> impl IntoView
where
    T: AggregateRoot + Clone + Send + Sync + 'static,
{
    let perms = permissions();
    let resource = T::collection_name();
    let selected_count = move || selection.with(|s| s.len());

    view! {
        <div class="page__header-right">
            {(perms.can(resource, Action::Delete)).then(|| view! {
                <Show when={move || selected_count() > 0}>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        class="button--danger"
                        on_click=move |_| dialog.open(DialogKind::BulkDelete, None)
                    >
                        {icon("trash")}
                        {move || format!(" Delete selected ({})", selected_count())}
                    </Button>
                </Show>
            })}
            {perms.can(resource, Action::Import).then(|| view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| dialog.open(DialogKind::Import, None)
                >
                    {icon("upload")}
                    " Import"
                </Button>
            })}
            {perms.can(resource, Action::Export).then(|| view! {
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| dialog.open(DialogKind::Export, None)
                >
                    {icon("download")}
                    " Export"
                </Button>
            })}
            {perms.can(resource, Action::Create).then(|| view! {
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| dialog.open(DialogKind::Add, None)
                >
                    {icon("plus")}
                    {format!(" Add {}", T::element_name())}
                </Button>
            })}
        </div>
    }
}
