//! Raw product form state and its validation into a [`ProductDraft`].
//!
//! The UI renders one flexible form; validation only looks at the fields
//! the selected product type needs.

use super::aggregate::{InitialStock, Product, ProductId, WarehousePrice};
use super::combo::ComboEditor;
use super::draft::{
    ComboLineDraft, Period, ProductDraft, ProductVariant, Promotion, StockKeeping, Tracking,
    DATE_FORMAT,
};
use super::enums::{BarcodeSymbology, PeriodUnit, ProductType, TaxMethod};
use crate::domain::common::serde_helpers::quantity;
use crate::shared::combobox::{parse_selection, StaticOptions};
use crate::shared::validation::{parse_decimal, parse_whole, FieldErrors};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Fields the product dialog shows errors for inline. Nested collections
/// are covered by their prefix.
pub const FORM_FIELDS: &[&str] = &[
    "type",
    "name",
    "code",
    "barcode_symbology",
    "brand_id",
    "category_id",
    "unit_id",
    "sale_unit_id",
    "purchase_unit_id",
    "cost",
    "price",
    "alert_quantity",
    "tax_id",
    "tax_method",
    "file",
    "image",
    "product_list",
    "diff_price",
    "initial_stock",
    "promotion_price",
    "starting_date",
    "last_date",
    "warranty",
    "warranty_type",
    "guarantee",
    "guarantee_type",
    "product_details",
];

#[derive(Debug, Clone, PartialEq)]
pub struct WarehousePriceInput {
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitialStockInput {
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub qty: String,
}

/// What the file input currently holds for a digital product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileState {
    pub has_new_file: bool,
    pub has_existing_file: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    // General
    pub name: String,
    pub code: String,
    pub product_type: String,
    pub barcode_symbology: String,
    pub brand_id: String,
    pub category_id: String,
    pub unit_id: String,
    pub sale_unit_id: String,
    pub purchase_unit_id: String,
    pub product_details: String,

    // Pricing
    pub cost: String,
    pub price: String,
    pub tax_id: String,
    pub tax_method: String,
    pub alert_quantity: String,
    pub promotion: bool,
    pub promotion_price: String,
    pub starting_date: String,
    pub last_date: String,

    // Flags
    pub is_variant: bool,
    pub is_batch: bool,
    pub is_imei: bool,
    pub is_diff_price: bool,
    pub is_online: bool,
    pub featured: bool,
    pub is_active: bool,

    // Extras
    pub warranty: String,
    pub warranty_type: String,
    pub guarantee: String,
    pub guarantee_type: String,

    // Collections
    pub combo: ComboEditor,
    pub warehouse_prices: Vec<WarehousePriceInput>,
    pub initial_stock: Vec<InitialStockInput>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            product_type: ProductType::Standard.code().to_string(),
            barcode_symbology: BarcodeSymbology::C128.code().to_string(),
            brand_id: String::new(),
            category_id: String::new(),
            unit_id: String::new(),
            sale_unit_id: String::new(),
            purchase_unit_id: String::new(),
            product_details: String::new(),
            cost: String::new(),
            price: String::new(),
            tax_id: String::new(),
            tax_method: TaxMethod::Exclusive.code().to_string(),
            alert_quantity: String::new(),
            promotion: false,
            promotion_price: String::new(),
            starting_date: String::new(),
            last_date: String::new(),
            is_variant: false,
            is_batch: false,
            is_imei: false,
            is_diff_price: false,
            is_online: true,
            featured: false,
            is_active: true,
            warranty: String::new(),
            warranty_type: PeriodUnit::Months.code().to_string(),
            guarantee: String::new(),
            guarantee_type: PeriodUnit::Months.code().to_string(),
            combo: ComboEditor::new(),
            warehouse_prices: Vec::new(),
            initial_stock: Vec::new(),
        }
    }
}

fn id_string(id: Option<i64>) -> String {
    id.map(|v| v.to_string()).unwrap_or_default()
}

fn num_string(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, ()> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(t, DATE_FORMAT).map(Some).map_err(|_| ())
}

impl ProductForm {
    pub fn from_product(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            code: p.code.clone(),
            product_type: p.product_type.code().to_string(),
            barcode_symbology: p.barcode_symbology.unwrap_or_default().code().to_string(),
            brand_id: id_string(p.brand_id),
            category_id: id_string(p.category_id),
            unit_id: id_string(p.unit_id),
            sale_unit_id: id_string(p.sale_unit_id),
            purchase_unit_id: id_string(p.purchase_unit_id),
            product_details: p.product_details.clone().unwrap_or_default(),
            cost: num_string(p.cost),
            price: p.price.to_string(),
            tax_id: id_string(p.tax_id),
            tax_method: p.tax_method.unwrap_or_default().code().to_string(),
            alert_quantity: p.alert_quantity.map(quantity).unwrap_or_default(),
            promotion: p.promotion,
            promotion_price: num_string(p.promotion_price),
            starting_date: p.starting_date.clone().unwrap_or_default(),
            last_date: p.last_date.clone().unwrap_or_default(),
            is_variant: p.is_variant,
            is_batch: p.is_batch,
            is_imei: p.is_imei,
            is_diff_price: p.is_diff_price,
            is_online: p.is_online,
            featured: p.featured,
            is_active: p.is_active,
            warranty: p.warranty.map(|v| v.to_string()).unwrap_or_default(),
            warranty_type: p.warranty_type.unwrap_or_default().code().to_string(),
            guarantee: p.guarantee.map(|v| v.to_string()).unwrap_or_default(),
            guarantee_type: p.guarantee_type.unwrap_or_default().code().to_string(),
            combo: ComboEditor::from_lines(&p.product_list),
            warehouse_prices: p
                .diff_price
                .iter()
                .map(|w| WarehousePriceInput {
                    warehouse_id: w.warehouse_id,
                    warehouse_name: w.warehouse_name.clone().unwrap_or_default(),
                    price: num_string(w.price),
                })
                .collect(),
            initial_stock: Vec::new(),
        }
    }

    pub fn product_type(&self) -> ProductType {
        ProductType::from_code(&self.product_type).unwrap_or_default()
    }

    /// Switching the base unit invalidates the sale and purchase units,
    /// which are drawn from the base unit's family.
    pub fn set_unit(&mut self, unit_id: String) {
        if unit_id != self.unit_id {
            self.sale_unit_id.clear();
            self.purchase_unit_id.clear();
        }
        self.unit_id = unit_id;
    }

    /// Copy the combo total into the price field.
    pub fn apply_combo_total(&mut self) {
        self.price = self.combo.total().to_string();
    }

    /// Merge the warehouse list into the price and stock editors, keeping
    /// values already typed or loaded.
    pub fn sync_warehouses(&mut self, warehouses: &[(i64, String)]) {
        let prices = std::mem::take(&mut self.warehouse_prices);
        let stock = std::mem::take(&mut self.initial_stock);
        for (id, name) in warehouses {
            let price = prices
                .iter()
                .find(|p| p.warehouse_id == *id)
                .map(|p| p.price.clone())
                .unwrap_or_default();
            self.warehouse_prices.push(WarehousePriceInput {
                warehouse_id: *id,
                warehouse_name: name.clone(),
                price,
            });
            let qty = stock
                .iter()
                .find(|s| s.warehouse_id == *id)
                .map(|s| s.qty.clone())
                .unwrap_or_default();
            self.initial_stock.push(InitialStockInput {
                warehouse_id: *id,
                warehouse_name: name.clone(),
                qty,
            });
        }
    }

    pub fn validate(
        &self,
        editing: Option<ProductId>,
        file: FileState,
    ) -> Result<ProductDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let product_type = match ProductType::from_code(self.product_type.trim()) {
            Some(t) => t,
            None => {
                errors.add("type", "Choose a product type.");
                ProductType::Standard
            }
        };

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.add("name", "The name field is required.");
        }

        let symbology = BarcodeSymbology::from_code(self.barcode_symbology.trim());
        if symbology.is_none() {
            errors.add("barcode_symbology", "Choose a barcode symbology.");
        }
        let code = self.code.trim().to_string();
        if code.is_empty() {
            errors.add("code", "The code field is required.");
        } else if let Some(sym) = symbology {
            if !sym.accepts(&code) {
                errors.add(
                    "code",
                    format!("The code is not a valid {} barcode.", sym.label()),
                );
            }
        }

        let tax_method = TaxMethod::from_code(self.tax_method.trim()).unwrap_or_default();

        let price = match parse_decimal(&self.price) {
            Ok(Some(v)) if v >= 0.0 => v,
            Ok(Some(_)) => {
                errors.add("price", "The price must be at least 0.");
                0.0
            }
            Ok(None) => {
                errors.add("price", "The price field is required.");
                0.0
            }
            Err(msg) => {
                errors.add("price", format!("The price {msg}."));
                0.0
            }
        };

        let alert_quantity = match parse_decimal(&self.alert_quantity) {
            Ok(Some(v)) if v < 0.0 => {
                errors.add("alert_quantity", "The alert quantity must be at least 0.");
                None
            }
            Ok(v) => v,
            Err(msg) => {
                errors.add("alert_quantity", format!("The alert quantity {msg}."));
                None
            }
        };

        let promotion = self.validate_promotion(&mut errors);
        let warranty = Self::validate_period(
            &mut errors,
            "warranty",
            &self.warranty,
            &self.warranty_type,
        );
        let guarantee = Self::validate_period(
            &mut errors,
            "guarantee",
            &self.guarantee,
            &self.guarantee_type,
        );
        let diff_price = self.validate_diff_price(&mut errors);

        let variant = match product_type {
            ProductType::Standard => {
                let stock = self.validate_stock(&mut errors);
                let initial_stock = if editing.is_none() {
                    self.validate_initial_stock(&mut errors)
                } else {
                    Vec::new()
                };
                stock.map(|stock| ProductVariant::Standard {
                    stock,
                    tracking: Tracking {
                        is_variant: self.is_variant,
                        is_batch: self.is_batch,
                        is_imei: self.is_imei,
                    },
                    initial_stock,
                })
            }
            ProductType::Combo => {
                let stock = self.validate_stock(&mut errors);
                let lines = self.validate_combo(&mut errors);
                stock.map(|stock| ProductVariant::Combo { stock, lines })
            }
            ProductType::Digital => {
                if !file.has_new_file && (editing.is_none() || !file.has_existing_file) {
                    errors.add("file", "A digital product needs a file.");
                }
                Some(ProductVariant::Digital)
            }
            ProductType::Service => Some(ProductVariant::Service),
        };

        errors.into_result()?;
        let Some(variant) = variant else {
            // validate_stock records an error whenever it yields None
            let mut errors = FieldErrors::new();
            errors.add("unit_id", "The unit field is required.");
            return Err(errors);
        };

        Ok(ProductDraft {
            name,
            code,
            barcode_symbology: symbology.unwrap_or_default(),
            brand_id: parse_selection(&self.brand_id),
            category_id: parse_selection(&self.category_id),
            tax_id: parse_selection(&self.tax_id),
            tax_method,
            price,
            alert_quantity: if product_type.keeps_stock() {
                alert_quantity
            } else {
                None
            },
            product_details: non_empty(&self.product_details),
            featured: self.featured,
            is_active: self.is_active,
            is_online: self.is_online,
            promotion,
            warranty,
            guarantee,
            diff_price,
            variant,
        })
    }

    fn validate_stock(&self, errors: &mut FieldErrors) -> Option<StockKeeping> {
        let unit_id = parse_selection(&self.unit_id);
        if unit_id.is_none() {
            errors.add("unit_id", "The unit field is required.");
        }
        let cost = match parse_decimal(&self.cost) {
            Ok(Some(v)) if v >= 0.0 => Some(v),
            Ok(Some(_)) => {
                errors.add("cost", "The cost must be at least 0.");
                None
            }
            Ok(None) => {
                errors.add("cost", "The cost field is required.");
                None
            }
            Err(msg) => {
                errors.add("cost", format!("The cost {msg}."));
                None
            }
        };
        Some(StockKeeping {
            unit_id: unit_id?,
            sale_unit_id: parse_selection(&self.sale_unit_id),
            purchase_unit_id: parse_selection(&self.purchase_unit_id),
            cost: cost?,
        })
    }

    fn validate_combo(&self, errors: &mut FieldErrors) -> Vec<ComboLineDraft> {
        if self.combo.is_empty() {
            errors.add("product_list", "Add at least one product to the combo.");
            return Vec::new();
        }
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(self.combo.len());
        for (i, line) in self.combo.lines().iter().enumerate() {
            if !seen.insert((line.product_id, line.variant_id)) {
                errors.add(
                    format!("product_list.{i}.product_id"),
                    format!("{} appears more than once.", line.name),
                );
            }
            let qty = match parse_decimal(&line.qty) {
                Ok(Some(q)) if q > 0.0 => q,
                _ => {
                    errors.add(
                        format!("product_list.{i}.qty"),
                        "The quantity must be greater than 0.",
                    );
                    continue;
                }
            };
            let unit_price = match parse_decimal(&line.unit_price) {
                Ok(Some(p)) if p >= 0.0 => p,
                _ => {
                    errors.add(
                        format!("product_list.{i}.unit_price"),
                        "The unit price must be at least 0.",
                    );
                    continue;
                }
            };
            out.push(ComboLineDraft {
                product_id: line.product_id,
                variant_id: line.variant_id,
                qty,
                unit_price,
            });
        }
        out
    }

    fn validate_promotion(&self, errors: &mut FieldErrors) -> Option<Promotion> {
        if !self.promotion {
            return None;
        }
        let price = match parse_decimal(&self.promotion_price) {
            Ok(Some(v)) if v >= 0.0 => Some(v),
            _ => {
                errors.add("promotion_price", "Enter a valid promotional price.");
                None
            }
        };
        let starting_date = match parse_date(&self.starting_date) {
            Ok(Some(d)) => Some(d),
            Ok(None) => {
                errors.add("starting_date", "The promotion start date is required.");
                None
            }
            Err(()) => {
                errors.add("starting_date", "Use the format YYYY-MM-DD.");
                None
            }
        };
        let last_date = match parse_date(&self.last_date) {
            Ok(d) => d,
            Err(()) => {
                errors.add("last_date", "Use the format YYYY-MM-DD.");
                None
            }
        };
        if let (Some(start), Some(end)) = (starting_date, last_date) {
            if end < start {
                errors.add("last_date", "The end date must not be before the start date.");
            }
        }
        Some(Promotion {
            price: price?,
            starting_date: starting_date?,
            last_date,
        })
    }

    fn validate_period(
        errors: &mut FieldErrors,
        field: &str,
        value: &str,
        unit: &str,
    ) -> Option<Period> {
        match parse_whole(value) {
            Ok(None) => None,
            Ok(Some(0)) | Err(_) => {
                errors.add(field, format!("The {field} must be a positive whole number."));
                None
            }
            Ok(Some(v)) => match PeriodUnit::from_code(unit.trim()) {
                Some(unit) => Some(Period { value: v, unit }),
                None => {
                    errors.add(format!("{field}_type"), "Choose a period.");
                    None
                }
            },
        }
    }

    fn validate_diff_price(&self, errors: &mut FieldErrors) -> Option<Vec<WarehousePrice>> {
        if !self.is_diff_price {
            return None;
        }
        let mut rows = Vec::new();
        for (i, row) in self.warehouse_prices.iter().enumerate() {
            match parse_decimal(&row.price) {
                Ok(None) => {}
                Ok(Some(v)) if v >= 0.0 => rows.push(WarehousePrice {
                    warehouse_id: row.warehouse_id,
                    warehouse_name: None,
                    price: Some(v),
                }),
                _ => errors.add(
                    format!("diff_price.{i}.price"),
                    "The price must be a number of at least 0.",
                ),
            }
        }
        Some(rows)
    }

    fn validate_initial_stock(&self, errors: &mut FieldErrors) -> Vec<InitialStock> {
        let mut rows = Vec::new();
        for (i, row) in self.initial_stock.iter().enumerate() {
            match parse_decimal(&row.qty) {
                Ok(None) => {}
                Ok(Some(v)) if v > 0.0 => rows.push(InitialStock {
                    warehouse_id: row.warehouse_id,
                    qty: v,
                }),
                Ok(Some(v)) if v == 0.0 => {}
                _ => errors.add(
                    format!("initial_stock.{i}.qty"),
                    "The quantity must be at least 0.",
                ),
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_product::ProductSearchItem;

    fn standard() -> ProductForm {
        ProductForm {
            name: "Mug".into(),
            code: "MUG-1".into(),
            unit_id: "1".into(),
            cost: "4".into(),
            price: "6".into(),
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_standard_requires_unit_and_cost() {
        let form = ProductForm {
            unit_id: String::new(),
            cost: String::new(),
            ..standard()
        };
        let errors = form.validate(None, FileState::default()).unwrap_err();
        assert!(errors.contains("unit_id"));
        assert!(errors.contains("cost"));
    }

    #[test]
    fn test_service_ignores_unit_and_cost() {
        let form = ProductForm {
            product_type: "service".into(),
            unit_id: String::new(),
            cost: String::new(),
            ..standard()
        };
        let draft = form.validate(None, FileState::default()).unwrap();
        assert_eq!(draft.variant, ProductVariant::Service);
        assert_eq!(draft.to_payload().get("unit_id"), Some(""));
    }

    #[test]
    fn test_digital_needs_file_on_create() {
        let form = ProductForm {
            product_type: "digital".into(),
            ..standard()
        };
        let errors = form.validate(None, FileState::default()).unwrap_err();
        assert!(errors.contains("file"));
        let with_file = FileState {
            has_new_file: true,
            has_existing_file: false,
        };
        assert!(form.validate(None, with_file).is_ok());
        let existing = FileState {
            has_new_file: false,
            has_existing_file: true,
        };
        assert!(form.validate(Some(ProductId(1)), existing).is_ok());
    }

    #[test]
    fn test_combo_needs_lines_with_positive_qty() {
        let mut form = ProductForm {
            product_type: "combo".into(),
            ..standard()
        };
        let errors = form.validate(None, FileState::default()).unwrap_err();
        assert!(errors.contains("product_list"));

        form.combo
            .add(&ProductSearchItem {
                id: 2,
                name: "Cup".into(),
                code: "C".into(),
                variant_id: None,
                variant_name: None,
                price: 3.0,
            })
            .unwrap();
        form.combo.set_qty(0, "0".into());
        let errors = form.validate(None, FileState::default()).unwrap_err();
        assert_eq!(
            errors.first_with_prefix("product_list"),
            Some("The quantity must be greater than 0.")
        );

        form.combo.set_qty(0, "2".into());
        form.apply_combo_total();
        let draft = form.validate(None, FileState::default()).unwrap();
        assert_eq!(draft.price, 6.0);
        match draft.variant {
            ProductVariant::Combo { lines, .. } => assert_eq!(lines.len(), 1),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_flag_errors_are_unbound_nested_lines_are_not() {
        let err = crate::shared::error::ApiError::from_response(
            422,
            r#"{"errors":{"product_list.1.product_id":["Cup appears more than once."]}}"#,
        );
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.first_unbound(FORM_FIELDS), None);

        let mut fields = fields.clone();
        fields.add("is_online", "The is online field must be true or false.");
        assert_eq!(
            fields.first_unbound(FORM_FIELDS),
            Some("The is online field must be true or false.")
        );
    }

    #[test]
    fn test_barcode_shape_checked() {
        let form = ProductForm {
            barcode_symbology: "EAN13".into(),
            code: "123".into(),
            ..standard()
        };
        let errors = form.validate(None, FileState::default()).unwrap_err();
        assert_eq!(errors.first("code"), Some("The code is not a valid EAN-13 barcode."));
    }

    #[test]
    fn test_promotion_dates() {
        let form = ProductForm {
            promotion: true,
            promotion_price: "5".into(),
            starting_date: "2024-06-10".into(),
            last_date: "2024-06-01".into(),
            ..standard()
        };
        let errors = form.validate(None, FileState::default()).unwrap_err();
        assert!(errors.contains("last_date"));

        let form = ProductForm {
            last_date: String::new(),
            ..form
        };
        let draft = form.validate(None, FileState::default()).unwrap();
        assert!(draft.promotion.is_some());
    }

    #[test]
    fn test_set_unit_clears_sale_and_purchase() {
        let mut form = standard();
        form.sale_unit_id = "2".into();
        form.purchase_unit_id = "3".into();
        form.set_unit("1".into());
        assert_eq!(form.sale_unit_id, "2");
        form.set_unit("4".into());
        assert!(form.sale_unit_id.is_empty());
        assert!(form.purchase_unit_id.is_empty());
    }

    #[test]
    fn test_initial_stock_only_on_create() {
        let mut form = standard();
        form.sync_warehouses(&[(1, "Main".into()), (2, "Shop".into())]);
        form.initial_stock[0].qty = "5".into();
        let draft = form.validate(None, FileState::default()).unwrap();
        match &draft.variant {
            ProductVariant::Standard { initial_stock, .. } => assert_eq!(initial_stock.len(), 1),
            other => panic!("unexpected variant {other:?}"),
        }
        let draft = form.validate(Some(ProductId(9)), FileState::default()).unwrap();
        match &draft.variant {
            ProductVariant::Standard { initial_stock, .. } => assert!(initial_stock.is_empty()),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_sync_warehouses_keeps_loaded_prices() {
        let mut form = standard();
        form.warehouse_prices.push(WarehousePriceInput {
            warehouse_id: 2,
            warehouse_name: String::new(),
            price: "7.5".into(),
        });
        form.sync_warehouses(&[(1, "Main".into()), (2, "Shop".into())]);
        assert_eq!(form.warehouse_prices.len(), 2);
        assert_eq!(form.warehouse_prices[1].price, "7.5");
        assert_eq!(form.warehouse_prices[1].warehouse_name, "Shop");
    }

    #[test]
    fn test_from_product_round_trip() {
        let product: Product = serde_json::from_str(
            r#"{"id":1,"name":"Mug","code":"MUG-1","type":"standard","unit_id":1,"cost":4,"price":6,
                "warranty":6,"warranty_type":"months","is_diff_price":1,
                "diff_price":[{"warehouse_id":2,"price":"5.5"}]}"#,
        )
        .unwrap();
        let form = ProductForm::from_product(&product);
        let draft = form
            .validate(Some(product.id), FileState::default())
            .unwrap();
        assert_eq!(draft.price, 6.0);
        assert_eq!(
            draft.warranty,
            Some(Period {
                value: 6,
                unit: PeriodUnit::Months
            })
        );
        assert_eq!(draft.diff_price.map(|d| d.len()), Some(1));
    }
}
