//! Type-conditional parts of the product form.

use super::view_model::ProductDetailsViewModel;
use crate::domain::a002_product::ui::picker::ComboProductSearch;
use crate::shared::components::ui::{Checkbox, Input, Select};
use crate::shared::icons::icon;
use contracts::domain::a002_product::{PeriodUnit, ProductForm};
use contracts::domain::common::serde_helpers::money;
use contracts::shared::combobox::{options, StaticOptions};
use leptos::prelude::*;

/// `(value, label)` pairs of a closed value set, for [`Select`].
pub fn select_pairs<T: StaticOptions>() -> Signal<Vec<(String, String)>> {
    Signal::stored(
        options::<T>()
            .into_iter()
            .map(|o| (o.value, o.label))
            .collect(),
    )
}

/// Message for a dynamic key such as `product_list.2.qty`.
fn error_at(vm: ProductDetailsViewModel, key: String) -> Signal<Option<String>> {
    let errors = vm.submit.errors;
    Signal::derive(move || errors.with(|e| e.first(&key).map(str::to_string)))
}

#[component]
pub fn ComboSection(vm: ProductDetailsViewModel) -> impl IntoView {
    let submit = vm.submit;
    let line_count = Memo::new(move |_| vm.form.with(|f| f.combo.len()));
    let total = move || vm.form.with(|f| money(f.combo.total()));

    view! {
        <fieldset class="form__section">
            <legend class="form__section-title">"Combo products"</legend>
            <ComboProductSearch
                on_pick=Callback::new(move |item| vm.add_combo_line(item))
                error=submit.error_for("product_list")
            />
            <Show
                when={move || line_count.get() > 0}
                fallback=|| view! { <p class="form__hint">"No products added yet."</p> }
            >
                <table class="combo-lines">
                    <thead>
                        <tr>
                            <th>"Product"</th>
                            <th>"Qty"</th>
                            <th>"Unit price"</th>
                            <th>"Subtotal"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || (0..line_count.get()).map(|i| {
                            let line = move || vm.form.with(|f| f.combo.lines().get(i).cloned());
                            view! {
                                <tr>
                                    <td>
                                        {move || line().map(|l| view! {
                                            <span class="table__cell-strong">{l.name}</span>
                                            <span class="combobox__hint">{l.code}</span>
                                        })}
                                        {move || error_at(vm, format!("product_list.{i}.product_id"))
                                            .get()
                                            .map(|e| view! { <div class="form__error">{e}</div> })}
                                    </td>
                                    <td>
                                        <Input
                                            input_type="number"
                                            value=Signal::derive(move || line().map(|l| l.qty).unwrap_or_default())
                                            on_input=Callback::new(move |v: String| vm.set_combo_qty(i, v))
                                            error=error_at(vm, format!("product_list.{i}.qty"))
                                        />
                                    </td>
                                    <td>
                                        <Input
                                            input_type="number"
                                            value=Signal::derive(move || line().map(|l| l.unit_price).unwrap_or_default())
                                            on_input=Callback::new(move |v: String| vm.set_combo_price(i, v))
                                            error=error_at(vm, format!("product_list.{i}.unit_price"))
                                        />
                                    </td>
                                    <td>
                                        {move || line()
                                            .and_then(|l| l.line_total())
                                            .map(money)
                                            .unwrap_or_else(|| "-".to_string())}
                                    </td>
                                    <td>
                                        <button
                                            type="button"
                                            class="button button--icon button--icon-danger"
                                            title="Remove"
                                            on:click=move |_| vm.remove_combo_line(i)
                                        >
                                            {icon("trash")}
                                        </button>
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="3">"Total"</td>
                            <td class="table__cell-strong">{total}</td>
                            <td></td>
                        </tr>
                    </tfoot>
                </table>
            </Show>
        </fieldset>
    }
}

/// Per-warehouse price overrides, shown when differential pricing is on.
#[component]
pub fn WarehousePriceSection(vm: ProductDetailsViewModel) -> impl IntoView {
    let rows = Memo::new(move |_| {
        vm.form.with(|f| {
            f.warehouse_prices
                .iter()
                .map(|w| w.warehouse_name.clone())
                .collect::<Vec<_>>()
        })
    });

    view! {
        <fieldset class="form__section">
            <legend class="form__section-title">"Warehouse prices"</legend>
            {move || {
                let names = rows.get();
                if names.is_empty() {
                    return view! { <p class="form__hint">"No warehouses available."</p> }.into_any();
                }
                names.into_iter().enumerate().map(|(i, name)| view! {
                    <Input
                        label=name
                        input_type="number"
                        value=Signal::derive(move || {
                            vm.form.with(|f| f.warehouse_prices.get(i).map(|w| w.price.clone()).unwrap_or_default())
                        })
                        on_input=Callback::new(move |v: String| vm.set_warehouse_price(i, v))
                        placeholder="Default price"
                        error=error_at(vm, format!("diff_price.{i}.price"))
                    />
                }).collect_view().into_any()
            }}
        </fieldset>
    }
}

/// Opening stock per warehouse; only offered when creating a standard product.
#[component]
pub fn InitialStockSection(vm: ProductDetailsViewModel) -> impl IntoView {
    let rows = Memo::new(move |_| {
        vm.form.with(|f| {
            f.initial_stock
                .iter()
                .map(|s| s.warehouse_name.clone())
                .collect::<Vec<_>>()
        })
    });

    view! {
        <fieldset class="form__section">
            <legend class="form__section-title">"Initial stock"</legend>
            {move || {
                let names = rows.get();
                if names.is_empty() {
                    return view! { <p class="form__hint">"No warehouses available."</p> }.into_any();
                }
                names.into_iter().enumerate().map(|(i, name)| view! {
                    <Input
                        label=name
                        input_type="number"
                        value=Signal::derive(move || {
                            vm.form.with(|f| f.initial_stock.get(i).map(|s| s.qty.clone()).unwrap_or_default())
                        })
                        on_input=Callback::new(move |v: String| vm.set_initial_stock(i, v))
                        placeholder="0"
                        error=error_at(vm, format!("initial_stock.{i}.qty"))
                    />
                }).collect_view().into_any()
            }}
        </fieldset>
    }
}

#[component]
pub fn PromotionSection(vm: ProductDetailsViewModel) -> impl IntoView {
    let submit = vm.submit;
    let field = move |f: fn(&ProductForm) -> String| Signal::derive(move || vm.form.with(f));

    view! {
        <Checkbox
            label="Promotional price"
            checked=Signal::derive(move || vm.form.with(|f| f.promotion))
            on_change=Callback::new(move |v: bool| vm.form.update(|f| f.promotion = v))
        />
        <Show when=move || vm.form.with(|f| f.promotion)>
            <div class="form__row">
                <Input
                    label="Promotion price"
                    input_type="number"
                    value=field(|f| f.promotion_price.clone())
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.promotion_price = v);
                        submit.clear_field("promotion_price");
                    })
                    error=submit.error_for("promotion_price")
                />
                <Input
                    label="Starts"
                    input_type="date"
                    value=field(|f| f.starting_date.clone())
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.starting_date = v);
                        submit.clear_field("starting_date");
                    })
                    error=submit.error_for("starting_date")
                />
                <Input
                    label="Ends"
                    input_type="date"
                    value=field(|f| f.last_date.clone())
                    on_input=Callback::new(move |v: String| {
                        vm.form.update(|f| f.last_date = v);
                        submit.clear_field("last_date");
                    })
                    error=submit.error_for("last_date")
                />
            </div>
        </Show>
    }
}

/// Warranty and guarantee periods: a whole number plus a unit.
#[component]
pub fn WarrantySection(vm: ProductDetailsViewModel) -> impl IntoView {
    let submit = vm.submit;
    let field = move |f: fn(&ProductForm) -> String| Signal::derive(move || vm.form.with(f));
    let periods = select_pairs::<PeriodUnit>();

    view! {
        <div class="form__row">
            <Input
                label="Warranty"
                input_type="number"
                value=field(|f| f.warranty.clone())
                on_input=Callback::new(move |v: String| {
                    vm.form.update(|f| f.warranty = v);
                    submit.clear_field("warranty");
                })
                placeholder="e.g. 12"
                error=submit.error_for("warranty")
            />
            <Select
                label="Warranty period"
                value=field(|f| f.warranty_type.clone())
                on_change=Callback::new(move |v: String| {
                    vm.form.update(|f| f.warranty_type = v);
                    submit.clear_field("warranty_type");
                })
                options=periods
                error=submit.error_for("warranty_type")
            />
        </div>
        <div class="form__row">
            <Input
                label="Guarantee"
                input_type="number"
                value=field(|f| f.guarantee.clone())
                on_input=Callback::new(move |v: String| {
                    vm.form.update(|f| f.guarantee = v);
                    submit.clear_field("guarantee");
                })
                placeholder="e.g. 6"
                error=submit.error_for("guarantee")
            />
            <Select
                label="Guarantee period"
                value=field(|f| f.guarantee_type.clone())
                on_change=Callback::new(move |v: String| {
                    vm.form.update(|f| f.guarantee_type = v);
                    submit.clear_field("guarantee_type");
                })
                options=periods
                error=submit.error_for("guarantee_type")
            />
        </div>
    }
}
