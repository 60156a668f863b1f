use super::shell::DialogShell;
use super::DialogContext;
use crate::shared::crud;
use crate::shared::query_client::QueryClient;
use crate::shared::toast::use_toast;
use contracts::domain::common::AggregateRoot;
use contracts::shared::confirm::ConfirmTarget;
use contracts::shared::dialog_state::DialogKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Type-to-confirm delete of the dialog's current row.
#[component]
pub fn DeleteDialog<T>(dialog: DialogContext<T>) -> impl IntoView
where
    T: AggregateRoot + Clone + Send + Sync + 'static,
{
    let toast = use_toast();
    let client = use_context::<QueryClient>().expect("QueryClient not found");
    let open = dialog.is_open_signal(DialogKind::Delete);
    let typed = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        if open.get() {
            typed.set(String::new());
        }
    });

    let target = move || {
        dialog
            .current_row()
            .map(|row| ConfirmTarget::Exact(row.confirm_text().to_string()))
    };
    let can_confirm = Signal::derive(move || {
        !submitting.get() && typed.with(|t| target().is_some_and(|target| target.is_satisfied(t)))
    });

    let confirm = move || {
        let Some(row) = dialog.current_row_untracked() else {
            return;
        };
        let target = ConfirmTarget::Exact(row.confirm_text().to_string());
        if submitting.get_untracked() || !typed.with_untracked(|t| target.is_satisfied(t)) {
            return;
        }
        submitting.set(true);
        let id = row.id();
        spawn_local(async move {
            match crud::delete::<T>(id).await {
                Ok(response) => {
                    toast.success(
                        response.message_or(&format!("{} deleted successfully", T::element_name())),
                    );
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
            title=format!("Delete {}", T::element_name().to_lowercase())
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
                    {move || if submitting.get() { "Deleting..." } else { "Delete" }}
                </Button>
            }
        >
            {move || target().map(|target| {
                let phrase = target.phrase().to_string();
                view! {
                    <p class="dialog__warning">
                        "This action cannot be undone. Type "
                        <strong>{phrase}</strong>
                        " to confirm."
                    </p>
                }
            })}
            <Input value=typed placeholder="Type to confirm" />
        </DialogShell>
    }
}
