use crate::domain::a002_product::api;
use crate::shared::dialog::submit::FormSubmitter;
use crate::shared::dialog::DialogContext;
use crate::shared::toast::{use_toast, ToastService};
use contracts::domain::a002_product::form::{FileState, FORM_FIELDS};
use contracts::domain::a002_product::pricing::profit_margin;
use contracts::domain::a002_product::{Product, ProductForm, ProductId, ProductSearchItem, ProductType};
use contracts::shared::validation::parse_decimal;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Margin line under the price inputs, e.g. `Margin: 25.00%`.
pub fn margin_label(form: &ProductForm) -> Option<String> {
    let cost = parse_decimal(&form.cost).ok().flatten()?;
    let price = parse_decimal(&form.price).ok().flatten()?;
    profit_margin(cost, price).map(|m| format!("Margin: {m:.2}%"))
}

/// ViewModel of the product add/edit dialog
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductForm>,
    pub editing: RwSignal<Option<Product>>,
    pub warehouses: RwSignal<Vec<(i64, String)>>,
    pub generating: RwSignal<bool>,
    /// Digital file marked for replacement or removal
    pub file_removed: RwSignal<bool>,
    pub submit: FormSubmitter,
    toast: ToastService,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ProductForm::default()),
            editing: RwSignal::new(None),
            warehouses: RwSignal::new(Vec::new()),
            generating: RwSignal::new(false),
            file_removed: RwSignal::new(false),
            submit: FormSubmitter::new(FORM_FIELDS),
            toast: use_toast(),
        }
    }

    pub fn reset(&self, row: Option<Product>) {
        let mut form = row
            .as_ref()
            .map(ProductForm::from_product)
            .unwrap_or_default();
        self.warehouses
            .with_untracked(|w| form.sync_warehouses(w));
        self.form.set(form);
        self.editing.set(row);
        self.file_removed.set(false);
        self.submit.reset();
    }

    /// Best effort: without warehouses the price and stock editors stay empty.
    pub fn load_warehouses(&self) {
        let this = *self;
        spawn_local(async move {
            match api::fetch_warehouses().await {
                Ok(list) => {
                    log::debug!("warehouses loaded: {}", list.len());
                    let _ = this.form.try_update(|f| f.sync_warehouses(&list));
                    let _ = this.warehouses.try_set(list);
                }
                Err(e) => log::warn!("warehouse prefetch failed: {e}"),
            }
        });
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.with(Option::is_some)
    }

    pub fn editing_id(&self) -> Option<ProductId> {
        self.editing.with_untracked(|e| e.as_ref().map(|p| p.id))
    }

    pub fn title(&self) -> String {
        if self.is_edit_mode() {
            "Edit Product".to_string()
        } else {
            "Add Product".to_string()
        }
    }

    pub fn product_type(&self) -> ProductType {
        self.form.with(ProductForm::product_type)
    }

    pub fn set_product_type(&self, code: String) {
        self.form.update(|f| f.product_type = code);
        self.submit.clear_field("type");
    }

    pub fn set_unit(&self, unit_id: Option<String>) {
        self.form.update(|f| f.set_unit(unit_id.unwrap_or_default()));
        self.submit.clear_field("unit_id");
    }

    pub fn generate_code(&self) {
        if self.generating.get_untracked() {
            return;
        }
        self.generating.set(true);
        let this = *self;
        spawn_local(async move {
            match api::generate_code().await {
                Ok(code) => {
                    let _ = this.form.try_update(|f| f.code = code);
                    this.submit.clear_field("code");
                }
                Err(e) => this.toast.error(e.user_message()),
            }
            let _ = this.generating.try_set(false);
        });
    }

    pub fn add_combo_line(&self, item: ProductSearchItem) {
        let mut outcome = Ok(());
        self.form.update(|f| {
            outcome = f.combo.add(&item);
            if outcome.is_ok() {
                f.apply_combo_total();
            }
        });
        match outcome {
            Ok(()) => self.submit.clear_field("product_list"),
            Err(msg) => self.toast.info(msg),
        }
    }

    pub fn remove_combo_line(&self, index: usize) {
        self.form.update(|f| {
            f.combo.remove(index);
            f.apply_combo_total();
        });
    }

    pub fn set_combo_qty(&self, index: usize, qty: String) {
        self.form.update(|f| {
            f.combo.set_qty(index, qty);
            f.apply_combo_total();
        });
        self.submit.clear_field(&format!("product_list.{index}.qty"));
    }

    pub fn set_combo_price(&self, index: usize, price: String) {
        self.form.update(|f| {
            f.combo.set_unit_price(index, price);
            f.apply_combo_total();
        });
        self.submit.clear_field(&format!("product_list.{index}.unit_price"));
    }

    pub fn set_warehouse_price(&self, index: usize, price: String) {
        self.form.update(|f| {
            if let Some(row) = f.warehouse_prices.get_mut(index) {
                row.price = price;
            }
        });
        self.submit.clear_field(&format!("diff_price.{index}.price"));
    }

    pub fn set_initial_stock(&self, index: usize, qty: String) {
        self.form.update(|f| {
            if let Some(row) = f.initial_stock.get_mut(index) {
                row.qty = qty;
            }
        });
        self.submit.clear_field(&format!("initial_stock.{index}.qty"));
    }

    pub fn existing_image(&self) -> Option<String> {
        self.editing
            .with(|e| e.as_ref().and_then(|p| p.image.clone()))
            .filter(|s| !s.trim().is_empty())
    }

    pub fn existing_file(&self) -> Option<String> {
        self.editing
            .with(|e| e.as_ref().and_then(|p| p.file.clone()))
            .filter(|s| !s.trim().is_empty())
    }

    pub fn save_command(
        &self,
        dialog: DialogContext<Product>,
        image: Option<web_sys::File>,
        file: Option<web_sys::File>,
    ) {
        let editing = self.editing_id();
        let file_state = FileState {
            has_new_file: file.is_some(),
            has_existing_file: !self.file_removed.get_untracked()
                && self.existing_file().is_some(),
        };
        let draft = match self.form.with_untracked(|f| f.validate(editing, file_state)) {
            Ok(draft) => draft,
            Err(errors) => {
                self.submit.reject(errors);
                return;
            }
        };
        let mut files = Vec::new();
        if let Some(image) = image {
            files.push(("image".to_string(), image));
        }
        // only digital products carry a file
        if let Some(file) = file.filter(|_| draft.product_type() == ProductType::Digital) {
            files.push(("file".to_string(), file));
        }
        self.submit
            .save::<Product, _>(editing, draft.to_payload(), files, move || dialog.close());
    }
}

impl Default for ProductDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_label() {
        let mut form = ProductForm::default();
        form.cost = "40".to_string();
        form.price = "50".to_string();
        assert_eq!(margin_label(&form), Some("Margin: 25.00%".to_string()));

        form.cost = "0".to_string();
        assert_eq!(margin_label(&form), None);

        form.cost = "abc".to_string();
        assert_eq!(margin_label(&form), None);
    }
}
