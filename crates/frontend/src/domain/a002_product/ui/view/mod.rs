use crate::shared::components::ui::{ActiveBadge, Badge};
use crate::shared::config::permissions;
use crate::shared::dialog::shell::DialogShell;
use crate::shared::dialog::use_dialog;
use contracts::domain::a002_product::{Product, ProductType};
use contracts::domain::common::serde_helpers::{money, quantity};
use contracts::domain::common::AggregateRoot;
use contracts::shared::combobox::StaticOptions;
use contracts::shared::dialog_state::DialogKind;
use contracts::shared::export::Exportable;
use contracts::shared::permissions::Action;
use leptos::prelude::*;
use thaw::*;

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn period(value: Option<i64>, unit: Option<&'static str>) -> String {
    match value {
        Some(v) => format!("{v} {}", unit.unwrap_or_default().to_lowercase()),
        None => "-".to_string(),
    }
}

#[component]
fn ComboLines(product: Product) -> impl IntoView {
    view! {
        <table class="combo-lines">
            <thead>
                <tr>
                    <th>"Product"</th>
                    <th>"Qty"</th>
                    <th>"Unit price"</th>
                </tr>
            </thead>
            <tbody>
                {product.product_list.into_iter().map(|line| view! {
                    <tr>
                        <td>
                            {if line.name.is_empty() { format!("#{}", line.product_id) } else { line.name }}
                            <span class="combobox__hint">{line.code}</span>
                        </td>
                        <td>{quantity(line.qty)}</td>
                        <td>{money(line.unit_price)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

/// Read-only details of the current row.
#[component]
pub fn ProductView() -> impl IntoView {
    let dialog = use_dialog::<Product>();
    let open = dialog.is_open_signal(DialogKind::View);
    let can_edit = permissions().can(Product::collection_name(), Action::Edit);
    let on_close = Callback::new(move |_| dialog.close());

    view! {
        <DialogShell
            open=open
            title=Signal::derive(move || {
                dialog.current_row().map(|p| p.name).unwrap_or_else(|| "Product".to_string())
            })
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            class="dialog--wide"
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Close"
                </Button>
                {can_edit.then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| dialog.open(DialogKind::Edit, dialog.current_row_untracked())
                    >
                        "Edit"
                    </Button>
                })}
            }
        >
            {move || dialog.current_row().map(|product| {
                let keeps_stock = product.product_type.keeps_stock();
                let is_combo = product.product_type == ProductType::Combo && !product.product_list.is_empty();
                view! {
                    {product.image.clone().filter(|s| !s.trim().is_empty()).map(|src| view! {
                        <img class="details-image" src=src alt="" />
                    })}
                    <dl class="details-list">
                        <dt>"Name"</dt>
                        <dd>{product.name.clone()}</dd>
                        <dt>"Code"</dt>
                        <dd>
                            {product.code.clone()}
                            {product.barcode_symbology.map(|b| view! {
                                <span class="combobox__hint">{b.label()}</span>
                            })}
                        </dd>
                        <dt>"Type"</dt>
                        <dd><Badge variant="neutral">{product.product_type.label()}</Badge></dd>
                        <dt>"Brand"</dt>
                        <dd>{or_dash(product.brand_name())}</dd>
                        <dt>"Category"</dt>
                        <dd>{or_dash(product.category_name())}</dd>
                        {keeps_stock.then(|| view! {
                            <dt>"Unit"</dt>
                            <dd>{or_dash(product.unit_name())}</dd>
                            <dt>"Cost"</dt>
                            <dd>{product.cell("cost")}</dd>
                        })}
                        <dt>"Price"</dt>
                        <dd>{money(product.price)}</dd>
                        <dt>"Margin"</dt>
                        <dd>{or_dash(&product.cell("margin"))}</dd>
                        <dt>"Tax"</dt>
                        <dd>
                            {product.tax.as_ref().map(|t| format!("{} ({}%)", t.name, quantity(t.rate))).unwrap_or_else(|| "-".to_string())}
                            {product.tax_method.map(|m| view! { <span class="combobox__hint">{m.label()}</span> })}
                        </dd>
                        {keeps_stock.then(|| view! {
                            <dt>"Stock"</dt>
                            <dd>
                                {quantity(product.qty)}
                                {product.is_low_stock().then(|| view! {
                                    <Badge variant="warning">"Low stock"</Badge>
                                })}
                            </dd>
                            <dt>"Alert quantity"</dt>
                            <dd>{product.alert_quantity.map(quantity).unwrap_or_else(|| "-".to_string())}</dd>
                        })}
                        {product.promotion.then(|| view! {
                            <dt>"Promotion"</dt>
                            <dd>
                                {format!(
                                    "{} from {} to {}",
                                    product.promotion_price.map(money).unwrap_or_default(),
                                    product.starting_date.clone().unwrap_or_default(),
                                    product.last_date.clone().unwrap_or_else(|| "open end".to_string()),
                                )}
                            </dd>
                        })}
                        <dt>"Warranty"</dt>
                        <dd>{period(product.warranty, product.warranty_type.map(|u| u.label()))}</dd>
                        <dt>"Guarantee"</dt>
                        <dd>{period(product.guarantee, product.guarantee_type.map(|u| u.label()))}</dd>
                        {product.file.clone().filter(|s| !s.trim().is_empty()).map(|href| view! {
                            <dt>"File"</dt>
                            <dd><a href=href target="_blank" rel="noopener">"Download"</a></dd>
                        })}
                        <dt>"Status"</dt>
                        <dd><ActiveBadge active=product.is_active /></dd>
                        <dt>"Flags"</dt>
                        <dd class="details-list__flags">
                            {product.featured.then(|| view! { <Badge variant="primary">"Featured"</Badge> })}
                            {product.is_online.then(|| view! { <Badge variant="neutral">"Online"</Badge> })}
                            {product.is_variant.then(|| view! { <Badge variant="neutral">"Variants"</Badge> })}
                            {product.is_batch.then(|| view! { <Badge variant="neutral">"Batches"</Badge> })}
                            {product.is_imei.then(|| view! { <Badge variant="neutral">"IMEI"</Badge> })}
                            {product.is_diff_price.then(|| view! { <Badge variant="neutral">"Warehouse prices"</Badge> })}
                        </dd>
                        {product.product_details.clone().filter(|s| !s.trim().is_empty()).map(|d| view! {
                            <dt>"Details"</dt>
                            <dd>{d}</dd>
                        })}
                        <dt>"Created"</dt>
                        <dd>{product.metadata.created_display()}</dd>
                        <dt>"Updated"</dt>
                        <dd>{product.metadata.updated_display()}</dd>
                    </dl>
                    {is_combo.then(|| view! { <ComboLines product=product.clone() /> })}
                }
            })}
        </DialogShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        assert_eq!(period(Some(12), Some("Months")), "12 months");
        assert_eq!(period(None, Some("Days")), "-");
    }
}
