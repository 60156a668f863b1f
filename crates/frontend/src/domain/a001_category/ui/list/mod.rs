use crate::domain::a001_category::ui::details::CategoryDetails;
use crate::domain::a001_category::ui::picker::{use_category_tree, ParentCategoryFilter};
use crate::domain::a001_category::ui::view::CategoryView;
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
use contracts::domain::a001_category::{Category, LIST_SPEC};
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::parse_selection;
use contracts::shared::export::Exportable;
use contracts::shared::facet::Facet;
use leptos::prelude::*;

const FILTER_PARENT: &str = "parent_id";

fn render_cell(category: &Category, key: &'static str) -> AnyView {
    match key {
        "name" => view! {
            <span class="table__cell-with-image">
                {category.has_image().then(|| view! {
                    <img class="table__thumb" src=category.image.clone().unwrap_or_default() alt="" />
                })}
                <span class="table__cell-strong">{category.name.clone()}</span>
            </span>
        }
        .into_any(),
        "parent" => match category.parent_name() {
            Some(name) => name.to_string().into_any(),
            None => view! { <span class="text-muted">"Root"</span> }.into_any(),
        },
        "products_count" => {
            let count = category.products_count.unwrap_or(0).to_string();
            view! { <Badge variant="neutral">{count}</Badge> }.into_any()
        }
        "status" => view! { <ActiveBadge active=category.is_active /> }.into_any(),
        "featured" => {
            if category.featured {
                view! { <Badge variant="primary">"Featured"</Badge> }.into_any()
            } else {
                view! { <span class="text-muted">"-"</span> }.into_any()
            }
        }
        _ => category.cell(key).into_any(),
    }
}

#[component]
pub fn CategoryList() -> impl IntoView {
    let state = EntityList::<Category>::new(LIST_SPEC);
    let list = state.list;
    let (tree, _) = use_category_tree();

    let parent_filter = Signal::derive(move || list.filter(FILTER_PARENT).unwrap_or_default());
    let parent_filter_label = move || {
        let id = parse_selection(&parent_filter.get())?;
        let label = tree.with(|t| t.as_ref().map(|t| t.path_label(id)).unwrap_or_default());
        Some(if label.is_empty() { format!("#{id}") } else { label })
    };

    view! {
        <PageFrame page_id=Category::list_page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Category::list_name()}</h1>
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
                                placeholder="Name or slug..."
                            />
                            <ParentCategoryFilter
                                value=parent_filter
                                on_change=Callback::new(move |v: Option<String>| list.set_filter(FILTER_PARENT, v))
                            />
                            <FacetFilterGroup
                                facet=Facet::Status
                                filter=state.facets
                                counts=state.facet_counts(Facet::Status)
                            />
                            <FacetFilterGroup
                                facet=Facet::Featured
                                filter=state.facets
                                counts=state.facet_counts(Facet::Featured)
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
                        {move || parent_filter_label().map(|name| view! {
                            <FilterTag
                                label=format!("Parent: {name}")
                                on_remove=Callback::new(move |_| list.set_filter(FILTER_PARENT, None))
                            />
                        })}
                    }
                />

                <div class="table-toolbar">
                    <ColumnToggle columns=Category::columns() visible=state.visible />
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

            <CategoryDetails />
            <CategoryView />
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
