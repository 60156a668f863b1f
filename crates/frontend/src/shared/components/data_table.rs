//! Server-paginated entity table.
//!
//! Rows arrive already sorted and paged by the backend; headers only
//! rewrite the URL sort. Columns come from [`Exportable::columns`] so the
//! table, the column toggle and the export dialog agree on keys.

use super::row_actions::RowActions;
use super::table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::dialog::DialogContext;
use crate::shared::list_controller::ListController;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::dialog_state::DialogKind;
use contracts::shared::export::{ColumnDef, Exportable};
use leptos::prelude::*;
use std::collections::BTreeSet;
use thaw::*;

fn visible_columns(
    columns: &'static [ColumnDef],
    visible: &BTreeSet<&'static str>,
) -> Vec<&'static ColumnDef> {
    columns.iter().filter(|c| visible.contains(c.key)).collect()
}

#[component]
pub fn DataTable<T>(
    #[prop(into)] rows: Signal<Vec<T>>,
    list: ListController,
    dialog: DialogContext<T>,
    visible: RwSignal<BTreeSet<&'static str>>,
    /// Entity-specific rendering of one cell
    render_cell: fn(&T, &'static str) -> AnyView,
    #[prop(into)] loading: Signal<bool>,
) -> impl IntoView
where
    T: AggregateRoot + Exportable + Clone + Send + Sync + 'static,
{
    let columns = T::columns();
    let resource = T::collection_name();
    let sort = Signal::derive(move || list.query.with(|q| q.sort.clone()));
    let on_sort = Callback::new(move |field: String| list.toggle_sort(&field));
    let row_ids = Signal::derive(move || rows.with(|r| r.iter().map(|row| row.id().value()).collect()));
    let shown = Memo::new(move |_| visible.with(|v| visible_columns(columns, v)));

    view! {
        <div class="table-wrapper" class:table-wrapper--loading=move || loading.get()>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell class="fixed-checkbox-column">
                            <TableHeaderCheckbox
                                items=row_ids
                                selected=list.selection
                                on_change=Callback::new(move |checked: bool| {
                                    list.set_all_selected(row_ids.get_untracked(), checked)
                                })
                            />
                        </TableHeaderCell>
                        {move || shown.get().into_iter().map(|col| {
                            if col.sortable {
                                view! {
                                    <SortableHeaderCell
                                        label=col.label
                                        sort_field=col.key
                                        sort=sort
                                        on_sort=on_sort
                                        min_width=120.0
                                    />
                                }.into_any()
                            } else {
                                view! {
                                    <TableHeaderCell resizable=true min_width=100.0>
                                        {col.label}
                                    </TableHeaderCell>
                                }.into_any()
                            }
                        }).collect_view()}
                        <TableHeaderCell class="table__cell--actions">"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|row| row.id().value()
                        children=move |row: T| {
                            let id = row.id().value();
                            let cells_row = row.clone();
                            let view_row = row.clone();
                            let click_row = row.clone();
                            let edit_row = row.clone();
                            let delete_row = row;
                            view! {
                                <TableRow
                                    attr:style="cursor: pointer;"
                                    class:table__row--selected=move || list.selection.with(|s| s.contains(&id))
                                    on:click={
                                        let row = click_row.clone();
                                        move |_| dialog.open(DialogKind::View, Some(row.clone()))
                                    }
                                >
                                    <TableCellCheckbox
                                        item_id=id
                                        selected=list.selection
                                        on_change=Callback::new(move |(id, checked): (i64, bool)| {
                                            list.toggle_selected(id, checked)
                                        })
                                    />
                                    {move || shown.get().into_iter().map(|col| {
                                        let cells_row = cells_row.clone();
                                        view! {
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {render_cell(&cells_row, col.key)}
                                                </TableCellLayout>
                                            </TableCell>
                                        }
                                    }).collect_view()}
                                    <RowActions
                                        resource=resource
                                        on_view=Callback::new(move |_| dialog.open(DialogKind::View, Some(view_row.clone())))
                                        on_edit=Callback::new(move |_| dialog.open(DialogKind::Edit, Some(edit_row.clone())))
                                        on_delete=Callback::new(move |_| dialog.open(DialogKind::Delete, Some(delete_row.clone())))
                                    />
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
            <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                <div class="table__empty">"No results."</div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_columns_keep_definition_order() {
        const DEFS: &[ColumnDef] = &[
            ColumnDef::new("name", "Name"),
            ColumnDef::new("code", "Code"),
            ColumnDef::new("status", "Status"),
        ];
        let visible: BTreeSet<&'static str> = ["status", "name"].into_iter().collect();
        let keys: Vec<&str> = visible_columns(DEFS, &visible).iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["name", "status"]);
    }
}
