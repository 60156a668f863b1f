use crate::domain::a001_category::ui::picker::{use_category_tree, CategoryPicker};
use crate::domain::a002_product::ui::details::ProductDetails;
use crate::domain::a002_product::ui::view::ProductView;
use crate::shared::components::combobox::use_dropdown_options;
use crate::shared::components::ui::{ActiveBadge, Badge, Checkbox, Input, Select};
use crate::shared::components::{
    ColumnToggle, DataTable, DropdownCombobox, ErrorPanel, FacetFilterGroup, FilterPanel,
    FilterTag, ListActions, PaginationControls,
};
use crate::shared::config::config;
use crate::shared::dialog::bulk_delete_dialog::BulkDeleteDialog;
use crate::shared::dialog::delete_dialog::DeleteDialog;
use crate::shared::dialog::export_dialog::ExportDialog;
use crate::shared::dialog::import_dialog::ImportDialog;
use crate::shared::list_controller::ListController;
use crate::shared::list_state::EntityList;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use crate::shared::query_client::ListView;
use contracts::domain::a002_product::{Product, ProductType, StockFilter, LIST_SPEC};
use contracts::domain::common::serde_helpers::{money, quantity};
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::{find_label, parse_selection, ComboOption, StaticOptions};
use contracts::shared::export::Exportable;
use contracts::shared::facet::Facet;
use leptos::prelude::*;

/// `(value, label)` pairs of a static filter, without an "all" entry.
fn filter_pairs<T: StaticOptions>(skip: Option<T>) -> Vec<(String, String)>
where
    T: PartialEq,
{
    T::ALL
        .iter()
        .filter(|v| Some(**v) != skip)
        .map(|v| (v.code().to_string(), v.label().to_string()))
        .collect()
}

/// Label of a boolean URL filter (`is_variant=1`).
fn flag_label(value: Option<String>, label: &'static str) -> Option<String> {
    matches!(value.as_deref(), Some("1" | "true")).then(|| label.to_string())
}

fn render_cell(product: &Product, key: &'static str) -> AnyView {
    match key {
        "name" => view! {
            <span class="table__cell-with-image">
                {product.image.clone().filter(|s| !s.trim().is_empty()).map(|src| view! {
                    <img class="table__thumb" src=src alt="" />
                })}
                <span class="table__cell-strong">{product.name.clone()}</span>
            </span>
        }
        .into_any(),
        "type" => {
            let label = product.product_type.label();
            view! { <Badge variant="neutral">{label}</Badge> }.into_any()
        }
        "price" => view! { <span class="table__cell-number">{money(product.price)}</span> }.into_any(),
        "cost" => view! { <span class="table__cell-number">{product.cell("cost")}</span> }.into_any(),
        "qty" => {
            if !product.product_type.keeps_stock() {
                view! { <span class="text-muted">"N/A"</span> }.into_any()
            } else if product.is_low_stock() {
                view! {
                    <span class="table__cell-number">
                        {quantity(product.qty)} " "
                        <Badge variant="warning">"Low"</Badge>
                    </span>
                }
                .into_any()
            } else {
                view! { <span class="table__cell-number">{quantity(product.qty)}</span> }.into_any()
            }
        }
        "status" => view! { <ActiveBadge active=product.is_active /> }.into_any(),
        "featured" => {
            if product.featured {
                view! { <Badge variant="primary">"Featured"</Badge> }.into_any()
            } else {
                view! { <span class="text-muted">"-"</span> }.into_any()
            }
        }
        _ => product.cell(key).into_any(),
    }
}

/// Chip for a filter whose value is a record id picked from `options`.
fn option_tag(
    list: ListController,
    key: &'static str,
    prefix: &'static str,
    options: Signal<Vec<ComboOption>>,
) -> impl IntoView {
    move || {
        let value = list.filter(key)?;
        parse_selection(&value)?;
        let label = options
            .with(|o| find_label(o, &value).map(str::to_string))
            .unwrap_or_else(|| format!("#{value}"));
        Some(view! {
            <FilterTag
                label=format!("{prefix}: {label}")
                on_remove=Callback::new(move |_| list.set_filter(key, None))
            />
        })
    }
}

/// Chip for a filter backed by a closed value set.
fn static_tag<T: StaticOptions>(
    list: ListController,
    key: &'static str,
    prefix: &'static str,
) -> impl IntoView {
    move || {
        let value = list.filter(key)?;
        let label = T::from_code(&value)?.label();
        Some(view! {
            <FilterTag
                label=format!("{prefix}: {label}")
                on_remove=Callback::new(move |_| list.set_filter(key, None))
            />
        })
    }
}

fn flag_tag(list: ListController, key: &'static str, label: &'static str) -> impl IntoView {
    move || {
        flag_label(list.filter(key), label).map(|label| view! {
            <FilterTag
                label=label
                on_remove=Callback::new(move |_| list.set_filter(key, None))
            />
        })
    }
}

#[component]
pub fn ProductList() -> impl IntoView {
    let state = EntityList::<Product>::new(LIST_SPEC);
    let list = state.list;

    let (tree, _) = use_category_tree();
    let category_options = Signal::derive(move || {
        tree.with(|t| t.as_ref().map(|t| t.filter_options()).unwrap_or_default())
    });
    let (brand_options, _) = use_dropdown_options("brands");
    let (unit_options, _) = use_dropdown_options("units");
    let (tax_options, _) = use_dropdown_options("taxes");
    let (warehouse_options, _) = use_dropdown_options("warehouses");

    let filter_value = move |key: &'static str| Signal::derive(move || list.filter(key).unwrap_or_default());
    let set = move |key: &'static str| Callback::new(move |v: Option<String>| list.set_filter(key, v));
    let set_str = move |key: &'static str| {
        Callback::new(move |v: String| list.set_filter(key, (!v.is_empty()).then_some(v)))
    };
    let set_flag = move |key: &'static str| {
        Callback::new(move |on: bool| list.set_filter(key, on.then(|| "1".to_string())))
    };
    let flag_on = move |key: &'static str| {
        Signal::derive(move || flag_label(list.filter(key), "").is_some())
    };

    view! {
        <PageFrame page_id=Product::list_page_id() category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{Product::list_name()}</h1>
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
                                placeholder="Name or code..."
                            />
                            <CategoryPicker
                                label="Category"
                                value=filter_value("category_id")
                                on_change=set("category_id")
                                placeholder="All categories"
                            />
                            <DropdownCombobox
                                resource="brands"
                                label="Brand"
                                value=filter_value("brand_id")
                                on_change=set("brand_id")
                                placeholder="All brands"
                            />
                            <DropdownCombobox
                                resource="units"
                                label="Unit"
                                value=filter_value("unit_id")
                                on_change=set("unit_id")
                                placeholder="All units"
                            />
                            <DropdownCombobox
                                resource="taxes"
                                label="Tax"
                                value=filter_value("tax_id")
                                on_change=set("tax_id")
                                placeholder="All taxes"
                            />
                            <DropdownCombobox
                                resource="warehouses"
                                label="Warehouse"
                                value=filter_value("warehouse_id")
                                on_change=set("warehouse_id")
                                placeholder="All warehouses"
                            />
                            <Select
                                label="Type"
                                value=filter_value("product_type")
                                on_change=set_str("product_type")
                                options=Signal::stored(filter_pairs::<ProductType>(None))
                                placeholder="All types"
                            />
                            <Select
                                label="Stock"
                                value=filter_value("stock_filter")
                                on_change=set_str("stock_filter")
                                options=Signal::stored(filter_pairs(Some(StockFilter::All)))
                                placeholder="All stock"
                            />
                            <div class="filter-panel__checks">
                                <Checkbox
                                    label="Has variants"
                                    checked=flag_on("is_variant")
                                    on_change=set_flag("is_variant")
                                />
                                <Checkbox
                                    label="IMEI tracked"
                                    checked=flag_on("is_imei")
                                    on_change=set_flag("is_imei")
                                />
                            </div>
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
                        {option_tag(list, "category_id", "Category", category_options)}
                        {option_tag(list, "brand_id", "Brand", brand_options)}
                        {option_tag(list, "unit_id", "Unit", unit_options)}
                        {option_tag(list, "tax_id", "Tax", tax_options)}
                        {option_tag(list, "warehouse_id", "Warehouse", warehouse_options)}
                        {static_tag::<ProductType>(list, "product_type", "Type")}
                        {static_tag::<StockFilter>(list, "stock_filter", "Stock")}
                        {flag_tag(list, "is_variant", "Has variants")}
                        {flag_tag(list, "is_imei", "IMEI tracked")}
                    }
                />

                <div class="table-toolbar">
                    <ColumnToggle columns=Product::columns() visible=state.visible />
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

            <ProductDetails />
            <ProductView />
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_pairs_skip() {
        let pairs = filter_pairs(Some(StockFilter::All));
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], ("in_stock".to_string(), "In stock".to_string()));
        assert_eq!(filter_pairs::<ProductType>(None).len(), 4);
    }

    #[test]
    fn test_flag_label() {
        assert_eq!(flag_label(Some("1".into()), "IMEI"), Some("IMEI".to_string()));
        assert_eq!(flag_label(Some("0".into()), "IMEI"), None);
        assert_eq!(flag_label(None, "IMEI"), None);
    }
}
