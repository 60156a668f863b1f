use super::sections::{
    select_pairs, ComboSection, InitialStockSection, PromotionSection, WarehousePriceSection,
    WarrantySection,
};
use super::view_model::{margin_label, ProductDetailsViewModel};
use crate::domain::a001_category::ui::picker::CategoryPicker;
use crate::domain::a002_product::ui::picker::use_sale_units;
use crate::domain::a003_unit::ui::picker::BaseUnitPicker;
use crate::shared::components::file_field::{clear_input, selected_file};
use crate::shared::components::ui::{Checkbox, Input, Select, Textarea};
use crate::shared::components::{Combobox, DropdownCombobox, FileField};
use crate::shared::dialog::shell::DialogShell;
use crate::shared::dialog::use_dialog;
use contracts::domain::a002_product::{BarcodeSymbology, Product, ProductForm, ProductType, TaxMethod};
use contracts::shared::combobox::parse_selection;
use contracts::shared::dialog_state::DialogKind;
use leptos::html;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ProductDetails() -> impl IntoView {
    let dialog = use_dialog::<Product>();
    let vm = ProductDetailsViewModel::new();
    let submit = vm.submit;
    vm.load_warehouses();

    let image_input = NodeRef::<html::Input>::new();
    let picked_image = RwSignal::new(None::<String>);
    let file_input = NodeRef::<html::Input>::new();
    let picked_file = RwSignal::new(None::<String>);

    let open = Signal::derive(move || dialog.is_open(DialogKind::Add) || dialog.is_open(DialogKind::Edit));

    Effect::new(move |was_open: Option<bool>| {
        let now = open.get();
        if now && was_open != Some(true) {
            vm.reset(dialog.current_row_untracked());
            clear_input(image_input);
            clear_input(file_input);
            picked_image.set(None);
            picked_file.set(None);
        }
        now
    });

    let field = move |f: fn(&ProductForm) -> String| Signal::derive(move || vm.form.with(f));
    let flag = move |f: fn(&ProductForm) -> bool| Signal::derive(move || vm.form.with(f));

    let product_type = Memo::new(move |_| vm.product_type());
    let keeps_stock = move || product_type.get().keeps_stock();
    let unit_id = Signal::derive(move || vm.form.with(|f| parse_selection(&f.unit_id)));
    let (sale_units, sale_units_loading) = use_sale_units(unit_id);
    let no_unit = Signal::derive(move || unit_id.get().is_none());

    let save = move || {
        vm.save_command(dialog, selected_file(image_input), selected_file(file_input));
    };

    let on_close = Callback::new(move |_| {
        if !submit.submitting.get_untracked() {
            dialog.close();
        }
    });

    view! {
        <DialogShell
            open=open
            title=Signal::derive(move || vm.title())
            on_close=on_close
            on_exit_complete=Callback::new(move |_| dialog.exit_complete())
            class="dialog--wide"
            footer=move || view! {
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || submit.submitting.get())
                    on_click=move |_| save()
                >
                    {move || match (submit.submitting.get(), vm.is_edit_mode()) {
                        (true, _) => "Saving...",
                        (false, true) => "Save changes",
                        (false, false) => "Create",
                    }}
                </Button>
            }
        >
            <form
                class="details-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    save();
                }
            >
                <div class="form__row">
                    <Select
                        label="Product type"
                        value=field(|f| f.product_type.clone())
                        on_change=Callback::new(move |v: String| vm.set_product_type(v))
                        options={select_pairs::<ProductType>()}
                        error=submit.error_for("type")
                    />
                    <Input
                        label="Name"
                        value=field(|f| f.name.clone())
                        on_input=Callback::new(move |v: String| {
                            vm.form.update(|f| f.name = v);
                            submit.clear_field("name");
                        })
                        required=true
                        error=submit.error_for("name")
                    />
                </div>

                <div class="form__row">
                    <div class="form__field-with-action">
                        <Input
                            label="Code"
                            value=field(|f| f.code.clone())
                            on_input=Callback::new(move |v: String| {
                                vm.form.update(|f| f.code = v);
                                submit.clear_field("code");
                            })
                            required=true
                            error=submit.error_for("code")
                        />
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || vm.generating.get())
                            on_click=move |_| vm.generate_code()
                        >
                            {move || if vm.generating.get() { "Generating..." } else { "Generate" }}
                        </Button>
                    </div>
                    <Select
                        label="Barcode symbology"
                        value=field(|f| f.barcode_symbology.clone())
                        on_change=Callback::new(move |v: String| {
                            vm.form.update(|f| f.barcode_symbology = v);
                            submit.clear_field("barcode_symbology");
                            submit.clear_field("code");
                        })
                        options={select_pairs::<BarcodeSymbology>()}
                        error=submit.error_for("barcode_symbology")
                    />
                </div>

                <div class="form__row">
                    <DropdownCombobox
                        resource="brands"
                        label="Brand"
                        value=field(|f| f.brand_id.clone())
                        on_change=Callback::new(move |v: Option<String>| {
                            vm.form.update(|f| f.brand_id = v.unwrap_or_default());
                        })
                        placeholder="No brand"
                        error=submit.error_for("brand_id")
                    />
                    <CategoryPicker
                        label="Category"
                        value=field(|f| f.category_id.clone())
                        on_change=Callback::new(move |v: Option<String>| {
                            vm.form.update(|f| f.category_id = v.unwrap_or_default());
                            submit.clear_field("category_id");
                        })
                        placeholder="No category"
                        error=submit.error_for("category_id")
                    />
                </div>

                <Show when=keeps_stock>
                    <div class="form__row">
                        <BaseUnitPicker
                            label="Unit"
                            value=field(|f| f.unit_id.clone())
                            on_change=Callback::new(move |v: Option<String>| vm.set_unit(v))
                            placeholder="Choose a unit"
                            error=submit.error_for("unit_id")
                        />
                        <Combobox
                            label="Sale unit"
                            options=sale_units
                            value=field(|f| f.sale_unit_id.clone())
                            on_change=Callback::new(move |v: Option<String>| {
                                vm.form.update(|f| f.sale_unit_id = v.unwrap_or_default());
                            })
                            loading=sale_units_loading
                            disabled=no_unit
                            placeholder="Same as unit"
                            error=submit.error_for("sale_unit_id")
                        />
                        <Combobox
                            label="Purchase unit"
                            options=sale_units
                            value=field(|f| f.purchase_unit_id.clone())
                            on_change=Callback::new(move |v: Option<String>| {
                                vm.form.update(|f| f.purchase_unit_id = v.unwrap_or_default());
                            })
                            loading=sale_units_loading
                            disabled=no_unit
                            placeholder="Same as unit"
                            error=submit.error_for("purchase_unit_id")
                        />
                    </div>
                </Show>

                <Show when=move || product_type.get() == ProductType::Combo>
                    <ComboSection vm=vm />
                </Show>

                <div class="form__row">
                    <Show when=keeps_stock>
                        <Input
                            label="Cost"
                            input_type="number"
                            value=field(|f| f.cost.clone())
                            on_input=Callback::new(move |v: String| {
                                vm.form.update(|f| f.cost = v);
                                submit.clear_field("cost");
                            })
                            required=true
                            error=submit.error_for("cost")
                        />
                    </Show>
                    <Input
                        label="Price"
                        input_type="number"
                        value=field(|f| f.price.clone())
                        on_input=Callback::new(move |v: String| {
                            vm.form.update(|f| f.price = v);
                            submit.clear_field("price");
                        })
                        required=true
                        error=submit.error_for("price")
                    />
                    <Show when=keeps_stock>
                        <Input
                            label="Alert quantity"
                            input_type="number"
                            value=field(|f| f.alert_quantity.clone())
                            on_input=Callback::new(move |v: String| {
                                vm.form.update(|f| f.alert_quantity = v);
                                submit.clear_field("alert_quantity");
                            })
                            error=submit.error_for("alert_quantity")
                        />
                    </Show>
                </div>
                {move || vm.form.with(margin_label).map(|m| view! { <p class="form__hint">{m}</p> })}

                <div class="form__row">
                    <DropdownCombobox
                        resource="taxes"
                        label="Tax"
                        value=field(|f| f.tax_id.clone())
                        on_change=Callback::new(move |v: Option<String>| {
                            vm.form.update(|f| f.tax_id = v.unwrap_or_default());
                        })
                        placeholder="No tax"
                        error=submit.error_for("tax_id")
                    />
                    <Select
                        label="Tax method"
                        value=field(|f| f.tax_method.clone())
                        on_change=Callback::new(move |v: String| vm.form.update(|f| f.tax_method = v))
                        options={select_pairs::<TaxMethod>()}
                        error=submit.error_for("tax_method")
                    />
                </div>

                <Show when=move || product_type.get() == ProductType::Digital>
                    <FileField
                        label="Digital file"
                        input=file_input
                        picked=picked_file
                        existing=Signal::derive(move || vm.existing_file())
                        on_remove_existing=Callback::new(move |_| vm.file_removed.set(true))
                        error=submit.error_for("file")
                    />
                </Show>

                <FileField
                    label="Image"
                    accept="image/*"
                    input=image_input
                    picked=picked_image
                    existing=Signal::derive(move || vm.existing_image())
                    image_preview=true
                    error=submit.error_for("image")
                />

                <div class="form__row form__row--checkboxes">
                    <Show when=move || product_type.get() == ProductType::Standard>
                        <Checkbox
                            label="Has variants"
                            checked=flag(|f| f.is_variant)
                            on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_variant = v))
                        />
                        <Checkbox
                            label="Batch tracking"
                            checked=flag(|f| f.is_batch)
                            on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_batch = v))
                        />
                        <Checkbox
                            label="IMEI / serial numbers"
                            checked=flag(|f| f.is_imei)
                            on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_imei = v))
                        />
                    </Show>
                    <Checkbox
                        label="Different price per warehouse"
                        checked=flag(|f| f.is_diff_price)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_diff_price = v))
                    />
                    <Checkbox
                        label="Sold online"
                        checked=flag(|f| f.is_online)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_online = v))
                    />
                    <Checkbox
                        label="Featured"
                        checked=flag(|f| f.featured)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.featured = v))
                    />
                    <Checkbox
                        label="Active"
                        checked=flag(|f| f.is_active)
                        on_change=Callback::new(move |v: bool| vm.form.update(|f| f.is_active = v))
                    />
                </div>

                <Show when=move || vm.form.with(|f| f.is_diff_price)>
                    <WarehousePriceSection vm=vm />
                </Show>

                <Show when=move || product_type.get() == ProductType::Standard && !vm.is_edit_mode()>
                    <InitialStockSection vm=vm />
                </Show>

                <PromotionSection vm=vm />
                <WarrantySection vm=vm />

                <Textarea
                    label="Details"
                    value=field(|f| f.product_details.clone())
                    on_input=Callback::new(move |v: String| vm.form.update(|f| f.product_details = v))
                    rows=4
                    error=submit.error_for("product_details")
                />
            </form>
        </DialogShell>
    }
}
