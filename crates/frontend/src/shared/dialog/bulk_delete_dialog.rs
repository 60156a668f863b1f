use super::shell::DialogShell;
use super::DialogContext;
use crate::shared::crud;
use crate::shared::query_client::QueryClient;
use crate::shared::toast::use_toast;
use contracts::domain::common::AggregateRoot;
use contracts::shared::confirm::{ConfirmTarget, BULK_DELETE_PHRASE};
use contracts::shared::dialog_state::DialogKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeSet;
use thaw::*;

/// Deletes every selected row after the user types `DELETE`.
#[component]
pub fn BulkDeleteDialog<T>(
    dialog: DialogContext<T>,
    selection: RwSignal<BTreeSet<i64>>,
) -> impl IntoView
where
    T: AggregateRoot + Clone + Send + Sync + 'static,
{
    let toast = use_toast();
    let client = use_context::<QueryClient>().expect("QueryClient not found");
    let open = dialog.is_open_signal(DialogKind::BulkDelete);
    let typed = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        if open.get() {
            typed.set(String::new());
        }
    });

    let count = move || selection.with(|s| s.len());
    let can_confirm = Signal::derive(move || {
        !submitting.get() && count() > 0 && typed.with(|t| ConfirmTarget::Bulk.is_satisfied(t))
    });

    let confirm = move || {
        if !can_confirm.get_untracked() {
            return;
        }
        let ids: Vec<i64> = selection.with_untracked(|s| s.iter().copied().collect());
        submitting.set(true);
        spawn_local(async move {
            match crud::bulk_delete::<T>(&ids).await {
                Ok(response) => {
                    toast.success(response.message_or(&format!(
                        "{} {} deleted successfully",
                        ids.len(),
                        T::list_name().to_lowercase()
                    )));
                    selection.set(BTreeSet::new());
                    client.invalidate(T::collection_name());
                    dialog.close();
                }
                Err(err) => toast.error(err.user_message()),
            }
            submitting.set(false);
        });
    };

    let on_close = Callback::new(move |_| {
        if !submitting.get_untracked() {
            dialog.close();
        }
    });

    view! {
        <DialogShell
            open=open
            title=format!("Delete selected {}", T::list_name().to_lowercase())
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    class="button--danger"
                    disabled=Signal::derive(move || !can_confirm.get())
                    on_click=move |_| confirm()
                >
                    {move || if submitting.get() { "Deleting..." } else { "Delete all" }}
                </Button>
            }
        >
            <p class="dialog__warning">
                {move || format!("{} record(s) will be permanently deleted. Type ", count())}
                <strong>{BULK_DELETE_PHRASE}</strong>
                " to confirm."
            </p>
            <Input value=typed placeholder=BULK_DELETE_PHRASE />
        </DialogShell>
    }
}
