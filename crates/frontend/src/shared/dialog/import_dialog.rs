//! Upload a CSV/spreadsheet; the backend parses it and reports per-row errors.

use super::shell::DialogShell;
use super::DialogContext;
use crate::shared::crud;
use crate::shared::query_client::QueryClient;
use crate::shared::toast::use_toast;
use contracts::domain::common::{AggregateRoot, ImportSummary};
use contracts::shared::dialog_state::DialogKind;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub const IMPORT_ACCEPT: &str = ".csv,.xls,.xlsx";

#[component]
pub fn ImportDialog<T>(dialog: DialogContext<T>) -> impl IntoView
where
    T: AggregateRoot + Clone + Send + Sync + 'static,
{
    let toast = use_toast();
    let client = use_context::<QueryClient>().expect("QueryClient not found");
    let open = dialog.is_open_signal(DialogKind::Import);
    let file_input = NodeRef::<leptos::html::Input>::new();
    let file_name = RwSignal::new(None::<String>);
    let summary = RwSignal::new(None::<ImportSummary>);
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        if open.get() {
            file_name.set(None);
            summary.set(None);
        }
    });

    let selected_file = move || {
        file_input
            .get_untracked()
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
    };

    let upload = move || {
        let Some(file) = selected_file() else {
            toast.error("Choose a file to import");
            return;
        };
        submitting.set(true);
        spawn_local(async move {
            match crud::import::<T>(file).await {
                Ok(result) => {
                    if result.imported > 0 {
                        client.invalidate(T::collection_name());
                    }
                    if result.is_clean() {
                        toast.success(result.headline());
                        dialog.close();
                    } else {
                        log::warn!("import finished with {} row errors", result.errors.len());
                        summary.set(Some(result));
                    }
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
            title=format!("Import {}", T::list_name().to_lowercase())
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || submitting.get() || file_name.get().is_none())
                    on_click=move |_| upload()
                >
                    {move || if submitting.get() { "Importing..." } else { "Import" }}
                </Button>
            }
        >
            <p class="dialog__hint">
                "Upload a CSV or spreadsheet file. Rows are validated by the server."
            </p>
            <label class="file-picker">
                <input
                    node_ref=file_input
                    type="file"
                    accept=IMPORT_ACCEPT
                    on:change=move |_| {
                        summary.set(None);
                        file_name.set(selected_file().map(|f| f.name()));
                    }
                />
                <span class="file-picker__name">
                    {move || file_name.get().unwrap_or_else(|| "No file chosen".to_string())}
                </span>
            </label>
            {move || summary.get().map(|summary| view! {
                <div class="import-summary">
                    <div class="import-summary__headline">{summary.headline()}</div>
                    <ul class="import-summary__errors">
                        {summary.errors.into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                    </ul>
                </div>
            })}
        </DialogShell>
    }
}
