use crate::shared::config::permissions;
use crate::shared::icons::icon;
use contracts::shared::permissions::Action;
use leptos::prelude::*;
use thaw::*;

/// View / edit / delete buttons of one row; actions the user may not
/// perform are not rendered.
#[component]
pub fn RowActions(
    /// Permission resource, e.g. `categories`
    resource: &'static str,
    on_view: Callback<()>,
    on_edit: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    let perms = permissions();

    view! {
        <TableCell class="table__cell--actions" on:click=|e| e.stop_propagation()>
            <div class="row-actions">
                {perms.can(resource, Action::View).then(|| view! {
                    <button class="button button--icon" title="View" on:click=move |_| on_view.run(())>
                        {icon("eye")}
                    </button>
                })}
                {perms.can(resource, Action::Edit).then(|| view! {
                    <button class="button button--icon" title="Edit" on:click=move |_| on_edit.run(())>
                        {icon("edit")}
                    </button>
                })}
                {perms.can(resource, Action::Delete).then(|| view! {
                    <button
                        class="button button--icon button--icon-danger"
                        title="Delete"
                        on:click=move |_| on_delete.run(())
                    >
                        {icon("trash")}
                    </button>
                })}
            </div>
        </TableCell>
    }
}
