//! Column picker plus delivery choice. Downloads are rendered in the
//! browser from the rows already loaded; email and schedule go to
//! `POST /{resource}/export` with either the active filters or the ids.

use super::shell::DialogShell;
use super::DialogContext;
use crate::shared::components::ui::RadioGroup;
use crate::shared::crud;
use crate::shared::download::download_bytes;
use crate::shared::toast::use_toast;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::dialog_state::DialogKind;
use contracts::shared::export::{
    build_export_table, export_file_name, render, ColumnDef, ExportFormat, ExportMethod,
    ExportRequest, ExportScope, Exportable,
};
use contracts::shared::list_query::{ListQuery, PARAM_SEARCH};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeSet;
use thaw::*;

fn default_columns(defs: &[ColumnDef]) -> Vec<String> {
    defs.iter()
        .filter(|d| d.default_visible)
        .map(|d| d.key.to_string())
        .collect()
}

/// Keeps the picked columns in table order.
fn toggle_column(defs: &[ColumnDef], picked: &[String], key: &str, on: bool) -> Vec<String> {
    defs.iter()
        .map(|d| d.key)
        .filter(|k| {
            if *k == key {
                on
            } else {
                picked.iter().any(|p| p == k)
            }
        })
        .map(str::to_string)
        .collect()
}

fn export_scope(query: &ListQuery, selected: &BTreeSet<i64>, only_selected: bool) -> ExportScope {
    if only_selected {
        return ExportScope::Ids {
            ids: selected.iter().copied().collect(),
        };
    }
    let mut filters = query.filters.clone();
    if !query.search.trim().is_empty() {
        filters.insert(PARAM_SEARCH.to_string(), query.search.trim().to_string());
    }
    ExportScope::Filters { filters }
}

fn format_code(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Excel => "excel",
        ExportFormat::Pdf => "pdf",
    }
}

fn method_code(method: ExportMethod) -> &'static str {
    match method {
        ExportMethod::Download => "download",
        ExportMethod::Email => "email",
        ExportMethod::Schedule => "schedule",
    }
}

const FORMATS: [ExportFormat; 2] = [ExportFormat::Excel, ExportFormat::Pdf];
const METHODS: [ExportMethod; 3] = [
    ExportMethod::Download,
    ExportMethod::Email,
    ExportMethod::Schedule,
];

#[component]
pub fn ExportDialog<T>(
    dialog: DialogContext<T>,
    /// Rows currently shown (page rows after facets)
    #[prop(into)]
    rows: Signal<Vec<T>>,
    #[prop(into)] query: Signal<ListQuery>,
    #[prop(into)] selection: Signal<BTreeSet<i64>>,
) -> impl IntoView
where
    T: AggregateRoot + Exportable + Clone + Send + Sync + 'static,
{
    let toast = use_toast();
    let open = dialog.is_open_signal(DialogKind::Export);
    let columns = RwSignal::new(default_columns(T::columns()));
    let format = RwSignal::new(ExportFormat::Excel);
    let method = RwSignal::new(ExportMethod::Download);
    let email = RwSignal::new(String::new());
    let only_selected = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    Effect::new(move |_| {
        if open.get() {
            only_selected.set(selection.with_untracked(|s| !s.is_empty()));
        }
    });

    let download = move || {
        let picked = columns.get_untracked();
        let fmt = format.get_untracked();
        let ids = selection.get_untracked();
        let data: Vec<T> = rows.with_untracked(|rows| {
            rows.iter()
                .filter(|r| !only_selected.get_untracked() || ids.contains(&r.id().value()))
                .cloned()
                .collect()
        });
        let result = build_export_table(&data, &picked)
            .and_then(|table| render(&table, fmt, T::list_name()))
            .map_err(|e| e.to_string())
            .and_then(|bytes| {
                let name = export_file_name(
                    T::collection_name(),
                    fmt,
                    js_sys::Date::now() as i64,
                );
                download_bytes(&bytes, fmt.mime_type(), &name)
            });
        match result {
            Ok(()) => {
                toast.success(format!("{} exported", T::list_name()));
                dialog.close();
            }
            Err(e) => toast.error(e),
        }
    };

    let send_request = move || {
        let m = method.get_untracked();
        let request = ExportRequest {
            format: format.get_untracked(),
            method: m,
            columns: columns.get_untracked(),
            email: (m == ExportMethod::Email).then(|| email.get_untracked().trim().to_string()),
            scope: query.with_untracked(|q| {
                selection.with_untracked(|s| export_scope(q, s, only_selected.get_untracked()))
            }),
        };
        if let Err(e) = request.validate() {
            toast.error(e.to_string());
            return;
        }
        submitting.set(true);
        spawn_local(async move {
            match crud::request_export::<T>(&request).await {
                Ok(response) => {
                    let fallback = match m {
                        ExportMethod::Schedule => "Export scheduled",
                        _ => "Export will be sent by email",
                    };
                    toast.success(response.message_or(fallback));
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

    let format_options: Vec<(String, String)> = FORMATS
        .iter()
        .map(|f| (format_code(*f).to_string(), f.label().to_string()))
        .collect();
    let method_options: Vec<(String, String)> = METHODS
        .iter()
        .map(|m| (method_code(*m).to_string(), m.label().to_string()))
        .collect();

    view! {
        <DialogShell
            open=open
            title=format!("Export {}", T::list_name().to_lowercase())
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            class="dialog--wide"
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || submitting.get() || columns.with(|c| c.is_empty()))
                    on_click=move |_| {
                        if method.get_untracked().is_client_side() {
                            download();
                        } else {
                            send_request();
                        }
                    }
                >
                    {move || if method.get().is_client_side() { "Download" } else { "Send" }}
                </Button>
            }
        >
            <div class="export-dialog">
                <div class="export-dialog__section">
                    <div class="form__label">"Columns"</div>
                    <div class="export-dialog__columns">
                        {T::columns().iter().map(|def| {
                            let key = def.key;
                            view! {
                                <label class="form__checkbox-wrapper">
                                    <input
                                        type="checkbox"
                                        class="form__checkbox"
                                        prop:checked=move || columns.with(|c| c.iter().any(|k| k == key))
                                        on:change=move |ev| {
                                            let on = event_target_checked(&ev);
                                            columns.update(|c| *c = toggle_column(T::columns(), c, key, on));
                                        }
                                    />
                                    <span class="form__checkbox-label">{def.label}</span>
                                </label>
                            }
                        }).collect_view()}
                    </div>
                </div>
                <RadioGroup
                    label="Format"
                    name="export-format"
                    value=Signal::derive(move || format_code(format.get()).to_string())
                    options=format_options.clone()
                    on_change=Callback::new(move |code: String| {
                        if let Some(f) = FORMATS.iter().find(|f| format_code(**f) == code) {
                            format.set(*f);
                        }
                    })
                />
                <RadioGroup
                    label="Delivery"
                    name="export-method"
                    value=Signal::derive(move || method_code(method.get()).to_string())
                    options=method_options.clone()
                    on_change=Callback::new(move |code: String| {
                        if let Some(m) = METHODS.iter().find(|m| method_code(**m) == code) {
                            method.set(*m);
                        }
                    })
                />
                <Show when=move || method.get() == ExportMethod::Email>
                    <Input value=email placeholder="Recipient email" />
                </Show>
                <label class="form__checkbox-wrapper">
                    <input
                        type="checkbox"
                        class="form__checkbox"
                        prop:checked=move || only_selected.get()
                        prop:disabled=move || selection.with(|s| s.is_empty())
                        on:change=move |ev| only_selected.set(event_target_checked(&ev))
                    />
                    <span class="form__checkbox-label">
                        {move || format!("Only selected rows ({})", selection.with(|s| s.len()))}
                    </span>
                </label>
                <p class="dialog__hint">
                    {move || if method.get().is_client_side() {
                        "The file is built from the rows on this page."
                    } else {
                        "The server exports every row matching the current filters."
                    }}
                </p>
            </div>
        </DialogShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    const DEFS: &[ColumnDef] = &[
        ColumnDef::new("name", "Name"),
        ColumnDef::new("code", "Code"),
        ColumnDef::new("created_at", "Created").hidden(),
    ];

    #[test]
    fn test_default_columns_skip_hidden() {
        assert_eq!(default_columns(DEFS), vec!["name", "code"]);
    }

    #[test]
    fn test_toggle_keeps_table_order() {
        let picked = vec!["code".to_string()];
        assert_eq!(
            toggle_column(DEFS, &picked, "name", true),
            vec!["name".to_string(), "code".to_string()]
        );
        assert!(toggle_column(DEFS, &picked, "code", false).is_empty());
    }

    #[test]
    fn test_scope_carries_search_and_filters() {
        let mut filters = BTreeMap::new();
        filters.insert("parent_id".to_string(), "4".to_string());
        let query = ListQuery {
            search: "shirt".to_string(),
            page: 2,
            page_size: 10,
            sort: None,
            filters,
        };
        let selected: BTreeSet<i64> = [7].into_iter().collect();
        match export_scope(&query, &selected, false) {
            ExportScope::Filters { filters } => {
                assert_eq!(filters.get("search").map(String::as_str), Some("shirt"));
                assert_eq!(filters.get("parent_id").map(String::as_str), Some("4"));
            }
            other => panic!("unexpected scope {other:?}"),
        }
        assert_eq!(
            export_scope(&query, &selected, true),
            ExportScope::Ids { ids: vec![7] }
        );
    }
}
