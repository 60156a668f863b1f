use crate::domain::a003_unit::ui::details::UnitDetails;
use crate::domain::a003_unit::ui::picker::{use_base_units, BaseUnitPicker};
use crate::domain::a003_unit::ui::view::UnitView;
use crate::shared::components::ui::{ActiveBadge, Badge, Input};
use crate::shared::components::{
    ColumnToggle, DataTable, ErrorPanel, FacetFilterGroup, FilterPanel, FilterTag, ListActions,
    PaginationControls,
};
use crate::shared::config::config;
use crate::shared::dialog::bulk_delete_dialog::BulkDeleteDialog;
use crate::shared::dialog::delete_dialog::DeleteDialog;
use crate::shared::dialog::export_dialog::ExportDialog;
use crate::shared::dialog::import_dialog::ImportDialog;
use crate::shared::list_state::EntityList;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::query_client::ListView;
use contracts::domain::a003_unit::{Unit, LIST_SPEC};
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::parse_selection;
use contracts::shared::export::Exportable;
use contracts::shared::facet::Facet;
use leptos::prelude::*;

const FILTER_BASE_UNIT: &str = "base_unit";

fn render_cell(unit: &Unit, key: &'static str) -> AnyView {
    match key {
        "name" => view! { <span class="table__cell-strong">{unit.name.clone()}</span> }.into_any(),
        "base_unit" => match &unit.base_unit_name {
            Some(name) => name.clone().into_any(),
            None => view! { <span class="text-muted">"Base unit"</span> }.into_any(),
        },
        "status" => view! { <ActiveBadge active=unit.is_active /> }.into_any(),
        _ => unit.cell(key).into_any(),
    }
}

#[component]
pub fn UnitList() -> impl IntoView {
    let state = EntityList::<Unit>::new(LIST_SPEC);
    let list = state.list;
    let (base_units, _) = use_base_units();

    let base_filter = Signal::derive(move || list.filter(FILTER_BASE_UNIT).unwrap_or_default());
    let base_filter_label = move || {
        let id = parse_selection(&base_filter.get())?;
        base_units.with(|units| units.iter().find(|u| u.id.0 == id).map(|u| u.name.clone()))
    };

    view! {
        <PageFrame page_id=Unit::list_page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Unit::list_name()}</h1>
                    <Badge variant="primary">{move || state.total().get().to_string()}</Badge>
                </div>
                <ListActions dialog=state.dialog selection=list.selection />
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=state.filters_expanded
                    active_filters_count=state.active_filter_count()
                    on_clear=Callback::new(move |_| state.clear_filters())
                    pagination_controls=move || view! {
                        <PaginationControls
                            meta=state.meta()
                            page_size=state.page_size()
                            on_page_change=Callback::new(move |p: u32| list.set_page(p))
                            on_page_size_change=Callback::new(move |s: u32| list.set_page_size(s))
                            page_size_options=config().list.page_size_options.clone()
                        />
                    }
                    filter_content=move || view! {
                        <div class="filter-panel__fields">
                            <Input
                                label="Search"
                                value=list.search_input
                                on_input=Callback::new(move |v: String| list.on_search_input(v))
                                placeholder="Code or name..."
                            />
                            <BaseUnitPicker
                                label="Base unit"
                                value=base_filter
                                on_change=Callback::new(move |v: Option<String>| list.set_filter(FILTER_BASE_UNIT, v))
                                placeholder="All units"
                            />
                            <FacetFilterGroup
                                facet=Facet::Status
                                filter=state.facets
                                counts=state.facet_counts(Facet::Status)
                            />
                        </div>
                    }
                    filter_tags=move || view! {
                        {move || {
                            let search = list.query.with(|q| q.search.clone());
                            (!search.is_empty()).then(|| view! {
                                <FilterTag
                                    label=format!("Search: {search}")
                                    on_remove=Callback::new(move |_| list.on_search_input(String::new()))
                                />
                            })
                        }}
                        {move || base_filter_label().map(|name| view! {
                            <FilterTag
                                label=format!("Base unit: {name}")
                                on_remove=Callback::new(move |_| list.set_filter(FILTER_BASE_UNIT, None))
                            />
                        })}
                    }
                />

                <div class="table-toolbar">
                    <ColumnToggle columns=Unit::columns() visible=state.visible />
                </div>

                {move || match state.page.view().get() {
                    ListView::Failed(err) => view! { <ErrorPanel error=err /> }.into_any(),
                    ListView::Rows => view! {
                        <DataTable
                            rows=state.rows()
                            list=list
                            dialog=state.dialog
                            visible=state.visible
                            render_cell=render_cell
                            loading=state.page.loading
                        />
                    }.into_any(),
                }}
            </div>

            <UnitDetails />
            <UnitView />
            <DeleteDialog dialog=state.dialog />
            <BulkDeleteDialog dialog=state.dialog selection=list.selection />
            <ImportDialog dialog=state.dialog />
            <ExportDialog
                dialog=state.dialog
                rows=state.rows()
                query=list.query
                selection=list.selection
            />
        </PageFrame>
    }
}
