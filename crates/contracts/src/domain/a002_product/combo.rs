//! Line editor for combo products.

use super::aggregate::{ComboLine, ProductSearchItem};
use super::pricing::round2;
use crate::domain::common::serde_helpers::quantity;
use crate::shared::validation::parse_decimal;

/// One editable combo line; quantities and prices stay as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboLineInput {
    pub product_id: i64,
    pub variant_id: Option<i64>,
    pub name: String,
    pub code: String,
    pub qty: String,
    pub unit_price: String,
}

impl ComboLineInput {
    pub fn line_total(&self) -> Option<f64> {
        let qty = parse_decimal(&self.qty).ok().flatten()?;
        let price = parse_decimal(&self.unit_price).ok().flatten()?;
        Some(qty * price)
    }

    fn same_item(&self, product_id: i64, variant_id: Option<i64>) -> bool {
        self.product_id == product_id && self.variant_id == variant_id
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboEditor {
    lines: Vec<ComboLineInput>,
}

impl ComboEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: &[ComboLine]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| ComboLineInput {
                    product_id: l.product_id,
                    variant_id: l.variant_id,
                    name: l.name.clone(),
                    code: l.code.clone(),
                    qty: quantity(l.qty),
                    unit_price: l.unit_price.to_string(),
                })
                .collect(),
        }
    }

    pub fn lines(&self) -> &[ComboLineInput] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn contains(&self, product_id: i64, variant_id: Option<i64>) -> bool {
        self.lines.iter().any(|l| l.same_item(product_id, variant_id))
    }

    /// Append a search result with quantity 1 at its current price.
    /// A product (or variant) already in the combo is rejected.
    pub fn add(&mut self, item: &ProductSearchItem) -> Result<(), String> {
        if self.contains(item.id, item.variant_id) {
            return Err(format!("{} is already part of this combo.", item.name));
        }
        self.lines.push(ComboLineInput {
            product_id: item.id,
            variant_id: item.variant_id,
            name: match &item.variant_name {
                Some(v) if !v.is_empty() => format!("{} ({})", item.name, v),
                _ => item.name.clone(),
            },
            code: item.code.clone(),
            qty: "1".to_string(),
            unit_price: item.price.to_string(),
        });
        Ok(())
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn set_qty(&mut self, index: usize, qty: String) {
        if let Some(line) = self.lines.get_mut(index) {
            line.qty = qty;
        }
    }

    pub fn set_unit_price(&mut self, index: usize, price: String) {
        if let Some(line) = self.lines.get_mut(index) {
            line.unit_price = price;
        }
    }

    /// Σ qty × unit price over lines with valid numbers.
    pub fn total(&self) -> f64 {
        round2(self.lines.iter().filter_map(ComboLineInput::line_total).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, variant: Option<i64>, price: f64) -> ProductSearchItem {
        ProductSearchItem {
            id,
            name: format!("P{id}"),
            code: format!("C{id}"),
            variant_id: variant,
            variant_name: variant.map(|v| format!("V{v}")),
            price,
        }
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let mut editor = ComboEditor::new();
        editor.add(&item(1, None, 2.5)).unwrap();
        editor.add(&item(2, None, 10.0)).unwrap();
        editor.set_qty(0, "4".into());
        assert_eq!(editor.total(), 20.0);
        editor.set_unit_price(1, "abc".into());
        assert_eq!(editor.total(), 10.0);
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let mut editor = ComboEditor::new();
        editor.add(&item(1, None, 1.0)).unwrap();
        assert!(editor.add(&item(1, None, 1.0)).is_err());
        // a different variant of the same product is a different item
        assert!(editor.add(&item(1, Some(3), 1.0)).is_ok());
        assert_eq!(editor.len(), 2);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut editor = ComboEditor::new();
        editor.add(&item(1, None, 1.0)).unwrap();
        editor.remove(5);
        assert_eq!(editor.len(), 1);
        editor.remove(0);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_from_saved_lines() {
        let editor = ComboEditor::from_lines(&[ComboLine {
            product_id: 3,
            variant_id: None,
            name: "Cup".into(),
            code: "CUP".into(),
            qty: 2.0,
            unit_price: 1.5,
        }]);
        assert_eq!(editor.lines()[0].qty, "2");
        assert_eq!(editor.total(), 3.0);
    }
}
