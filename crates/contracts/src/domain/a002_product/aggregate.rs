use super::enums::{BarcodeSymbology, PeriodUnit, ProductType, TaxMethod};
use super::pricing::profit_margin;
use crate::domain::common::serde_helpers::{
    flex_bool, flex_f64, flex_f64_opt, flex_i64_opt, lenient_opt, money, quantity,
};
use crate::domain::common::{AggregateRoot, EntityMetadata};
use crate::shared::combobox::{ComboOption, StaticOptions};
use crate::shared::export::{ColumnDef, Exportable};
use crate::shared::facet::{Facet, Faceted};
use crate::shared::list_query::ListSpec;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::record_id!(ProductId);

// ============================================================================
// Embedded references
// ============================================================================

/// `{id, name}` reference to a brand, category or unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRef {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "flex_f64")]
    pub rate: f64,
}

impl TaxRef {
    pub fn to_option(&self) -> ComboOption {
        ComboOption::new(self.id.to_string(), self.name.clone())
            .with_hint(format!("{}%", quantity(self.rate)))
    }
}

/// One constituent of a combo product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboLine {
    pub product_id: i64,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub variant_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "flex_f64")]
    pub qty: f64,
    #[serde(default, deserialize_with = "flex_f64")]
    pub unit_price: f64,
}

/// Per-warehouse price override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehousePrice {
    pub warehouse_id: i64,
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub price: Option<f64>,
}

/// Opening quantity per warehouse, only sent on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialStock {
    pub warehouse_id: i64,
    #[serde(default, deserialize_with = "flex_f64")]
    pub qty: f64,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub barcode_symbology: Option<BarcodeSymbology>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Download URL of the digital file.
    #[serde(default)]
    pub file: Option<String>,

    // References
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub brand_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub brand: Option<NamedRef>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub category: Option<NamedRef>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub unit_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub unit: Option<NamedRef>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub sale_unit_id: Option<i64>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub purchase_unit_id: Option<i64>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub tax_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub tax: Option<TaxRef>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub tax_method: Option<TaxMethod>,

    // Pricing and stock
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub cost: Option<f64>,
    #[serde(default, deserialize_with = "flex_f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "flex_f64")]
    pub qty: f64,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub alert_quantity: Option<f64>,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub promotion_price: Option<f64>,
    #[serde(default)]
    pub starting_date: Option<String>,
    #[serde(default)]
    pub last_date: Option<String>,

    // Flags
    #[serde(default, deserialize_with = "flex_bool")]
    pub is_variant: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub is_batch: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub is_imei: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub is_diff_price: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub promotion: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub is_online: bool,
    #[serde(default, deserialize_with = "flex_bool")]
    pub featured: bool,
    #[serde(default = "default_true", deserialize_with = "flex_bool")]
    pub is_active: bool,

    // Warranty / guarantee
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub warranty: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub warranty_type: Option<PeriodUnit>,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub guarantee: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub guarantee_type: Option<PeriodUnit>,

    #[serde(default)]
    pub product_details: Option<String>,

    // Type-conditional collections
    #[serde(default)]
    pub product_list: Vec<ComboLine>,
    #[serde(default)]
    pub diff_price: Vec<WarehousePrice>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Product {
    pub fn margin(&self) -> Option<f64> {
        self.cost.and_then(|cost| profit_margin(cost, self.price))
    }

    pub fn is_low_stock(&self) -> bool {
        self.product_type.keeps_stock()
            && self.alert_quantity.is_some_and(|alert| self.qty <= alert)
    }

    pub fn brand_name(&self) -> &str {
        self.brand.as_ref().map_or("", |r| r.name.as_str())
    }

    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("", |r| r.name.as_str())
    }

    pub fn unit_name(&self) -> &str {
        self.unit.as_ref().map_or("", |r| r.name.as_str())
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "products"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

/// Result row of `/products/search-combo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSearchItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub variant_id: Option<i64>,
    #[serde(default)]
    pub variant_name: Option<String>,
    #[serde(default, deserialize_with = "flex_f64")]
    pub price: f64,
}

impl ProductSearchItem {
    pub fn label(&self) -> String {
        match &self.variant_name {
            Some(v) if !v.is_empty() => format!("{} ({}) [{}]", self.name, v, self.code),
            _ => format!("{} [{}]", self.name, self.code),
        }
    }

    /// Combobox value: `product` or `product:variant`.
    pub fn option_value(&self) -> String {
        match self.variant_id {
            Some(v) => format!("{}:{}", self.id, v),
            None => self.id.to_string(),
        }
    }

    pub fn to_option(&self) -> ComboOption {
        ComboOption::new(self.option_value(), self.label())
            .with_hint(money(self.price))
    }
}

// ============================================================================
// List
// ============================================================================
pub const LIST_SPEC: ListSpec = ListSpec {
    filter_keys: &[
        "category_id",
        "brand_id",
        "unit_id",
        "tax_id",
        "warehouse_id",
        "is_variant",
        "is_imei",
        "stock_filter",
        "product_type",
    ],
    sortable: &["name", "code", "price", "cost", "qty", "created_at"],
    default_page_size: 10,
};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("name", "Name").sortable(),
    ColumnDef::new("code", "Code").sortable(),
    ColumnDef::new("type", "Type"),
    ColumnDef::new("brand", "Brand"),
    ColumnDef::new("category", "Category"),
    ColumnDef::new("unit", "Unit").hidden(),
    ColumnDef::new("cost", "Cost").sortable(),
    ColumnDef::new("price", "Price").sortable(),
    ColumnDef::new("margin", "Margin").hidden(),
    ColumnDef::new("qty", "Stock").sortable(),
    ColumnDef::new("status", "Status"),
    ColumnDef::new("featured", "Featured").hidden(),
    ColumnDef::new("created_at", "Created").sortable().hidden(),
];

impl Exportable for Product {
    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "type" => self.product_type.label().to_string(),
            "brand" => self.brand_name().to_string(),
            "category" => self.category_name().to_string(),
            "unit" => self.unit_name().to_string(),
            "cost" => self.cost.map(money).unwrap_or_default(),
            "price" => money(self.price),
            "margin" => self
                .margin()
                .map(|m| format!("{m:.2}%"))
                .unwrap_or_default(),
            "qty" => {
                if self.product_type.keeps_stock() {
                    quantity(self.qty)
                } else {
                    "N/A".to_string()
                }
            }
            "status" => (if self.is_active { "Active" } else { "Inactive" }).to_string(),
            "featured" => (if self.featured { "Yes" } else { "No" }).to_string(),
            "created_at" => self.metadata.created_display(),
            _ => String::new(),
        }
    }
}

impl Faceted for Product {
    fn facet_value(&self, facet: Facet) -> Option<bool> {
        Some(match facet {
            Facet::Status => self.is_active,
            Facet::Featured => self.featured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "id": 10, "name": "Gift box", "code": "GB-1", "type": "combo",
        "barcode_symbology": "C128", "brand": {"id": 1, "name": "Acme"},
        "unit_id": "1", "cost": "40.00", "price": "50.00", "qty": "3",
        "alert_quantity": 5, "is_active": 1, "featured": "0", "tax_method": "",
        "product_list": [{"product_id": 2, "variant_id": null, "qty": "2", "unit_price": "12.5"}],
        "created_at": "2024-06-01T10:00:00Z"
    }"#;

    #[test]
    fn test_parses_combo_row() {
        let p: Product = serde_json::from_str(ROW).unwrap();
        assert_eq!(p.product_type, ProductType::Combo);
        assert_eq!(p.brand_name(), "Acme");
        assert_eq!(p.unit_id, Some(1));
        assert_eq!(p.tax_method, None);
        assert_eq!(p.product_list.len(), 1);
        assert_eq!(p.product_list[0].unit_price, 12.5);
        assert!(p.is_low_stock());
    }

    #[test]
    fn test_export_cells() {
        let p: Product = serde_json::from_str(ROW).unwrap();
        assert_eq!(p.cell("price"), "50.00");
        assert_eq!(p.cell("margin"), "25.00%");
        assert_eq!(p.cell("type"), "Combo");
        assert_eq!(p.cell("qty"), "3");
    }

    #[test]
    fn test_service_has_no_stock_column() {
        let p: Product =
            serde_json::from_str(r#"{"id":1,"name":"Repair","type":"service","price":10}"#)
                .unwrap();
        assert_eq!(p.cell("qty"), "N/A");
        assert_eq!(p.cell("cost"), "");
        assert!(!p.is_low_stock());
    }

    #[test]
    fn test_search_item_option() {
        let item: ProductSearchItem = serde_json::from_str(
            r#"{"id":4,"name":"Mug","code":"M1","variant_id":7,"variant_name":"Red","price":"3"}"#,
        )
        .unwrap();
        let opt = item.to_option();
        assert_eq!(opt.value, "4:7");
        assert_eq!(opt.label, "Mug (Red) [M1]");
        assert_eq!(opt.hint.as_deref(), Some("3.00"));
    }
}
