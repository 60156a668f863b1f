//! Closed value sets of the product form, rendered as static comboboxes.

use crate::shared::combobox::StaticOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Standard,
    Combo,
    Digital,
    Service,
}

impl ProductType {
    /// Digital goods and services carry no stock, so unit and cost are optional.
    pub fn keeps_stock(&self) -> bool {
        matches!(self, ProductType::Standard | ProductType::Combo)
    }
}

impl StaticOptions for ProductType {
    const ALL: &'static [Self] = &[
        ProductType::Standard,
        ProductType::Combo,
        ProductType::Digital,
        ProductType::Service,
    ];

    fn code(&self) -> &'static str {
        match self {
            ProductType::Standard => "standard",
            ProductType::Combo => "combo",
            ProductType::Digital => "digital",
            ProductType::Service => "service",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ProductType::Standard => "Standard",
            ProductType::Combo => "Combo",
            ProductType::Digital => "Digital",
            ProductType::Service => "Service",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarcodeSymbology {
    #[default]
    C128,
    C39,
    UPCA,
    UPCE,
    EAN8,
    EAN13,
}

impl BarcodeSymbology {
    /// Fixed digit count for the numeric symbologies (check digit included).
    pub fn fixed_length(&self) -> Option<usize> {
        match self {
            BarcodeSymbology::UPCA => Some(12),
            BarcodeSymbology::UPCE => Some(8),
            BarcodeSymbology::EAN8 => Some(8),
            BarcodeSymbology::EAN13 => Some(13),
            BarcodeSymbology::C128 | BarcodeSymbology::C39 => None,
        }
    }

    /// Shape check of a product code against the symbology.
    pub fn accepts(&self, code: &str) -> bool {
        match self.fixed_length() {
            Some(len) => code.len() == len && code.chars().all(|c| c.is_ascii_digit()),
            None if *self == BarcodeSymbology::C39 => code.chars().all(|c| {
                c.is_ascii_uppercase() || c.is_ascii_digit() || " -.$/+%".contains(c)
            }),
            None => code.is_ascii(),
        }
    }
}

impl StaticOptions for BarcodeSymbology {
    const ALL: &'static [Self] = &[
        BarcodeSymbology::C128,
        BarcodeSymbology::C39,
        BarcodeSymbology::UPCA,
        BarcodeSymbology::UPCE,
        BarcodeSymbology::EAN8,
        BarcodeSymbology::EAN13,
    ];

    fn code(&self) -> &'static str {
        match self {
            BarcodeSymbology::C128 => "C128",
            BarcodeSymbology::C39 => "C39",
            BarcodeSymbology::UPCA => "UPCA",
            BarcodeSymbology::UPCE => "UPCE",
            BarcodeSymbology::EAN8 => "EAN8",
            BarcodeSymbology::EAN13 => "EAN13",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BarcodeSymbology::C128 => "Code 128",
            BarcodeSymbology::C39 => "Code 39",
            BarcodeSymbology::UPCA => "UPC-A",
            BarcodeSymbology::UPCE => "UPC-E",
            BarcodeSymbology::EAN8 => "EAN-8",
            BarcodeSymbology::EAN13 => "EAN-13",
        }
    }
}

/// Warranty / guarantee period unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Days,
    #[default]
    Months,
    Years,
}

impl StaticOptions for PeriodUnit {
    const ALL: &'static [Self] = &[PeriodUnit::Days, PeriodUnit::Months, PeriodUnit::Years];

    fn code(&self) -> &'static str {
        match self {
            PeriodUnit::Days => "days",
            PeriodUnit::Months => "months",
            PeriodUnit::Years => "years",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PeriodUnit::Days => "Days",
            PeriodUnit::Months => "Months",
            PeriodUnit::Years => "Years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxMethod {
    #[default]
    Exclusive,
    Inclusive,
}

impl TaxMethod {
    /// Net price and tax amount for a shelf price at `rate` percent.
    pub fn split(&self, price: f64, rate: f64) -> (f64, f64) {
        match self {
            TaxMethod::Exclusive => (price, price * rate / 100.0),
            TaxMethod::Inclusive => {
                let net = price / (1.0 + rate / 100.0);
                (net, price - net)
            }
        }
    }
}

impl StaticOptions for TaxMethod {
    const ALL: &'static [Self] = &[TaxMethod::Exclusive, TaxMethod::Inclusive];

    fn code(&self) -> &'static str {
        match self {
            TaxMethod::Exclusive => "exclusive",
            TaxMethod::Inclusive => "inclusive",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TaxMethod::Exclusive => "Exclusive",
            TaxMethod::Inclusive => "Inclusive",
        }
    }
}

/// `stock_filter` list parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    OutOfStock,
    LowStock,
}

impl StaticOptions for StockFilter {
    const ALL: &'static [Self] = &[
        StockFilter::All,
        StockFilter::InStock,
        StockFilter::OutOfStock,
        StockFilter::LowStock,
    ];

    fn code(&self) -> &'static str {
        match self {
            StockFilter::All => "all",
            StockFilter::InStock => "in_stock",
            StockFilter::OutOfStock => "out_of_stock",
            StockFilter::LowStock => "low_stock",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            StockFilter::All => "All stock",
            StockFilter::InStock => "In stock",
            StockFilter::OutOfStock => "Out of stock",
            StockFilter::LowStock => "Low stock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::combobox::options;

    #[test]
    fn test_codes_round_trip() {
        for t in ProductType::ALL {
            assert_eq!(ProductType::from_code(t.code()), Some(*t));
        }
        assert_eq!(StockFilter::from_code("low_stock"), Some(StockFilter::LowStock));
        assert_eq!(BarcodeSymbology::from_code("ean13"), None);
        assert_eq!(options::<PeriodUnit>().len(), 3);
    }

    #[test]
    fn test_serde_matches_codes() {
        assert_eq!(serde_json::to_string(&ProductType::Digital).unwrap(), "\"digital\"");
        assert_eq!(serde_json::to_string(&BarcodeSymbology::EAN13).unwrap(), "\"EAN13\"");
        assert_eq!(serde_json::to_string(&TaxMethod::Inclusive).unwrap(), "\"inclusive\"");
    }

    #[test]
    fn test_keeps_stock() {
        assert!(ProductType::Combo.keeps_stock());
        assert!(!ProductType::Service.keeps_stock());
    }

    #[test]
    fn test_symbology_shape() {
        assert!(BarcodeSymbology::EAN13.accepts("4006381333931"));
        assert!(!BarcodeSymbology::EAN13.accepts("400638133393"));
        assert!(BarcodeSymbology::C39.accepts("AB-12"));
        assert!(!BarcodeSymbology::C39.accepts("ab"));
        assert!(BarcodeSymbology::C128.accepts("any-Code_1"));
    }

    #[test]
    fn test_tax_split() {
        let (net, tax) = TaxMethod::Exclusive.split(100.0, 10.0);
        assert_eq!((net, tax), (100.0, 10.0));
        let (net, tax) = TaxMethod::Inclusive.split(110.0, 10.0);
        assert!((net - 100.0).abs() < 1e-9);
        assert!((tax - 10.0).abs() < 1e-9);
    }
}
