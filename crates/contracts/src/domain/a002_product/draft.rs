//! Validated product, modelled per product type, and its multipart encoding.

use super::aggregate::{InitialStock, WarehousePrice};
use super::enums::{BarcodeSymbology, PeriodUnit, ProductType, TaxMethod};
use crate::shared::combobox::StaticOptions;
use crate::shared::form_payload::FormPayload;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockKeeping {
    pub unit_id: i64,
    pub sale_unit_id: Option<i64>,
    pub purchase_unit_id: Option<i64>,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tracking {
    pub is_variant: bool,
    pub is_batch: bool,
    pub is_imei: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComboLineDraft {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub qty: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Promotion {
    pub price: f64,
    pub starting_date: NaiveDate,
    pub last_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub value: u32,
    pub unit: PeriodUnit,
}

/// Type-specific part of a product. Only the active variant's fields are
/// validated and sent.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductVariant {
    Standard {
        stock: StockKeeping,
        tracking: Tracking,
        /// Empty when editing; opening stock is only recorded on create.
        initial_stock: Vec<InitialStock>,
    },
    Combo {
        stock: StockKeeping,
        lines: Vec<ComboLineDraft>,
    },
    /// The file itself travels as a multipart part added by the caller.
    Digital,
    Service,
}

impl ProductVariant {
    pub fn product_type(&self) -> ProductType {
        match self {
            ProductVariant::Standard { .. } => ProductType::Standard,
            ProductVariant::Combo { .. } => ProductType::Combo,
            ProductVariant::Digital => ProductType::Digital,
            ProductVariant::Service => ProductType::Service,
        }
    }

    pub fn stock(&self) -> Option<&StockKeeping> {
        match self {
            ProductVariant::Standard { stock, .. } | ProductVariant::Combo { stock, .. } => {
                Some(stock)
            }
            ProductVariant::Digital | ProductVariant::Service => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub code: String,
    pub barcode_symbology: BarcodeSymbology,
    pub brand_id: Option<i64>,
    pub category_id: Option<i64>,
    pub tax_id: Option<i64>,
    pub tax_method: TaxMethod,
    pub price: f64,
    pub alert_quantity: Option<f64>,
    pub product_details: Option<String>,
    pub featured: bool,
    pub is_active: bool,
    pub is_online: bool,
    pub promotion: Option<Promotion>,
    pub warranty: Option<Period>,
    pub guarantee: Option<Period>,
    /// `None` when per-warehouse pricing is off.
    pub diff_price: Option<Vec<WarehousePrice>>,
    pub variant: ProductVariant,
}

impl ProductDraft {
    pub fn product_type(&self) -> ProductType {
        self.variant.product_type()
    }

    pub fn to_payload(&self) -> FormPayload {
        let mut p = FormPayload::new();
        p.text("name", &self.name)
            .text("code", &self.code)
            .text("type", self.product_type().code())
            .text("barcode_symbology", self.barcode_symbology.code())
            .opt_number("brand_id", self.brand_id)
            .opt_number("category_id", self.category_id)
            .opt_number("tax_id", self.tax_id)
            .text("tax_method", self.tax_method.code())
            .number("price", self.price)
            .opt_number("alert_quantity", self.alert_quantity)
            .opt_text("product_details", self.product_details.as_deref())
            .flag("featured", self.featured)
            .flag("is_active", self.is_active)
            .flag("is_online", self.is_online);

        // Stock-keeping fields are cleared for digital goods and services.
        let stock = self.variant.stock();
        p.opt_number("unit_id", stock.map(|s| s.unit_id))
            .opt_number("sale_unit_id", stock.and_then(|s| s.sale_unit_id))
            .opt_number("purchase_unit_id", stock.and_then(|s| s.purchase_unit_id))
            .opt_number("cost", stock.map(|s| s.cost));

        let tracking = match &self.variant {
            ProductVariant::Standard { tracking, .. } => *tracking,
            _ => Tracking::default(),
        };
        p.flag("is_variant", tracking.is_variant)
            .flag("is_batch", tracking.is_batch)
            .flag("is_imei", tracking.is_imei);

        match &self.promotion {
            Some(promo) => {
                p.flag("promotion", true)
                    .number("promotion_price", promo.price)
                    .text("starting_date", promo.starting_date.format(DATE_FORMAT).to_string())
                    .opt_text(
                        "last_date",
                        promo
                            .last_date
                            .map(|d| d.format(DATE_FORMAT).to_string())
                            .as_deref(),
                    );
            }
            None => {
                p.flag("promotion", false)
                    .text("promotion_price", "")
                    .text("starting_date", "")
                    .text("last_date", "");
            }
        }

        p.opt_number("warranty", self.warranty.map(|w| w.value))
            .opt_text("warranty_type", self.warranty.map(|w| w.unit.code()))
            .opt_number("guarantee", self.guarantee.map(|g| g.value))
            .opt_text("guarantee_type", self.guarantee.map(|g| g.unit.code()));

        p.flag("is_diff_price", self.diff_price.is_some());
        for (i, row) in self.diff_price.iter().flatten().enumerate() {
            p.nested(
                "diff_price",
                i,
                [
                    ("warehouse_id", row.warehouse_id.to_string()),
                    ("price", row.price.map(|v| v.to_string()).unwrap_or_default()),
                ],
            );
        }

        match &self.variant {
            ProductVariant::Combo { lines, .. } => {
                for (i, line) in lines.iter().enumerate() {
                    p.nested(
                        "product_list",
                        i,
                        [
                            ("product_id", line.product_id.to_string()),
                            (
                                "variant_id",
                                line.variant_id.map(|v| v.to_string()).unwrap_or_default(),
                            ),
                            ("qty", line.qty.to_string()),
                            ("unit_price", line.unit_price.to_string()),
                        ],
                    );
                }
            }
            ProductVariant::Standard { initial_stock, .. } => {
                for (i, row) in initial_stock.iter().enumerate() {
                    p.nested(
                        "initial_stock",
                        i,
                        [
                            ("warehouse_id", row.warehouse_id.to_string()),
                            ("qty", row.qty.to_string()),
                        ],
                    );
                }
            }
            ProductVariant::Digital | ProductVariant::Service => {}
        }

        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(variant: ProductVariant) -> ProductDraft {
        ProductDraft {
            name: "Mug".into(),
            code: "M-1".into(),
            barcode_symbology: BarcodeSymbology::C128,
            brand_id: None,
            category_id: Some(3),
            tax_id: None,
            tax_method: TaxMethod::Exclusive,
            price: 9.5,
            alert_quantity: None,
            product_details: None,
            featured: false,
            is_active: true,
            is_online: true,
            promotion: None,
            warranty: None,
            guarantee: None,
            diff_price: None,
            variant,
        }
    }

    #[test]
    fn test_service_clears_stock_fields() {
        let p = base(ProductVariant::Service).to_payload();
        assert_eq!(p.get("type"), Some("service"));
        assert_eq!(p.get("unit_id"), Some(""));
        assert_eq!(p.get("cost"), Some(""));
        assert_eq!(p.get("is_variant"), Some("0"));
        assert_eq!(p.get("brand_id"), Some(""));
        assert_eq!(p.get("category_id"), Some("3"));
        assert_eq!(p.get("is_diff_price"), Some("0"));
    }

    #[test]
    fn test_combo_lines_are_indexed() {
        let p = base(ProductVariant::Combo {
            stock: StockKeeping {
                unit_id: 1,
                sale_unit_id: None,
                purchase_unit_id: None,
                cost: 4.0,
            },
            lines: vec![
                ComboLineDraft {
                    product_id: 5,
                    variant_id: None,
                    qty: 2.0,
                    unit_price: 3.0,
                },
                ComboLineDraft {
                    product_id: 6,
                    variant_id: Some(9),
                    qty: 1.0,
                    unit_price: 3.5,
                },
            ],
        })
        .to_payload();
        assert_eq!(p.get("product_list[0][product_id]"), Some("5"));
        assert_eq!(p.get("product_list[0][variant_id]"), Some(""));
        assert_eq!(p.get("product_list[1][variant_id]"), Some("9"));
        assert_eq!(p.get("product_list[1][unit_price]"), Some("3.5"));
        assert_eq!(p.get("unit_id"), Some("1"));
        assert!(!p.contains("initial_stock[0][qty]"));
    }

    #[test]
    fn test_promotion_and_diff_price() {
        let mut draft = base(ProductVariant::Digital);
        draft.promotion = Some(Promotion {
            price: 7.0,
            starting_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            last_date: None,
        });
        draft.diff_price = Some(vec![WarehousePrice {
            warehouse_id: 2,
            warehouse_name: None,
            price: Some(8.25),
        }]);
        draft.warranty = Some(Period {
            value: 6,
            unit: PeriodUnit::Months,
        });
        let p = draft.to_payload();
        assert_eq!(p.get("promotion"), Some("1"));
        assert_eq!(p.get("starting_date"), Some("2024-06-01"));
        assert_eq!(p.get("last_date"), Some(""));
        assert_eq!(p.get("is_diff_price"), Some("1"));
        assert_eq!(p.get("diff_price[0][price]"), Some("8.25"));
        assert_eq!(p.get("warranty"), Some("6"));
        assert_eq!(p.get("warranty_type"), Some("months"));
        assert_eq!(p.get("guarantee_type"), Some(""));
    }

    #[test]
    fn test_standard_initial_stock() {
        let p = base(ProductVariant::Standard {
            stock: StockKeeping {
                unit_id: 1,
                sale_unit_id: Some(2),
                purchase_unit_id: Some(3),
                cost: 5.0,
            },
            tracking: Tracking {
                is_variant: false,
                is_batch: true,
                is_imei: false,
            },
            initial_stock: vec![InitialStock {
                warehouse_id: 1,
                qty: 10.0,
            }],
        })
        .to_payload();
        assert_eq!(p.get("is_batch"), Some("1"));
        assert_eq!(p.get("sale_unit_id"), Some("2"));
        assert_eq!(p.get("initial_stock[0][qty]"), Some("10"));
    }
}
