use crate::domain::common::serde_helpers::{
    flex_bool, flex_f64_opt, flex_i64_opt, lenient_opt, quantity,
};
use crate::domain::common::{AggregateRoot, ArenaNode, EntityMetadata};
use crate::shared::combobox::StaticOptions;
use crate::shared::export::{ColumnDef, Exportable};
use crate::shared::facet::{Facet, Faceted};
use crate::shared::list_query::ListSpec;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::record_id!(UnitId);

// ============================================================================
// Operator
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOperator {
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl StaticOptions for UnitOperator {
    const ALL: &'static [Self] = &[UnitOperator::Multiply, UnitOperator::Divide];

    fn code(&self) -> &'static str {
        match self {
            UnitOperator::Multiply => "*",
            UnitOperator::Divide => "/",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UnitOperator::Multiply => "Multiply (*)",
            UnitOperator::Divide => "Divide (/)",
        }
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    #[serde(default)]
    pub code: String,
    pub name: String,
    #[serde(default, deserialize_with = "flex_i64_opt")]
    pub base_unit: Option<i64>,
    /// Name of the base unit when the backend embeds it.
    #[serde(default)]
    pub base_unit_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt")]
    pub operator: Option<UnitOperator>,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub operation_value: Option<f64>,
    #[serde(default = "default_true", deserialize_with = "flex_bool")]
    pub is_active: bool,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Unit {
    /// Operator and factor, only when a base unit is set and the factor is usable.
    fn conversion(&self) -> Option<(UnitOperator, f64)> {
        self.base_unit?;
        let value = self.operation_value.filter(|v| *v > 0.0)?;
        Some((self.operator.unwrap_or(UnitOperator::Multiply), value))
    }

    pub fn is_base(&self) -> bool {
        self.base_unit.is_none()
    }

    /// Quantity expressed in this unit converted to the base unit.
    pub fn to_base(&self, qty: f64) -> f64 {
        match self.conversion() {
            Some((UnitOperator::Multiply, v)) => qty * v,
            Some((UnitOperator::Divide, v)) => qty / v,
            None => qty,
        }
    }

    /// Quantity in the base unit converted to this unit.
    pub fn from_base(&self, qty: f64) -> f64 {
        match self.conversion() {
            Some((UnitOperator::Multiply, v)) => qty / v,
            Some((UnitOperator::Divide, v)) => qty * v,
            None => qty,
        }
    }

    /// `1 Box = 12 Piece`; empty for base units.
    pub fn conversion_label(&self, base_name: Option<&str>) -> String {
        let Some(base) = base_name.or(self.base_unit_name.as_deref()) else {
            return String::new();
        };
        if self.conversion().is_none() {
            return String::new();
        }
        format!("1 {} = {} {}", self.name, quantity(self.to_base(1.0)), base)
    }
}

impl AggregateRoot for Unit {
    type Id = UnitId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "units"
    }

    fn element_name() -> &'static str {
        "Unit"
    }

    fn list_name() -> &'static str {
        "Units"
    }
}

impl ArenaNode for Unit {
    fn node_id(&self) -> i64 {
        self.id.0
    }

    fn parent_id(&self) -> Option<i64> {
        self.base_unit
    }

    fn node_label(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// List
// ============================================================================
pub const LIST_SPEC: ListSpec = ListSpec {
    filter_keys: &["base_unit"],
    sortable: &["code", "name", "created_at"],
    default_page_size: 10,
};

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("code", "Code").sortable(),
    ColumnDef::new("name", "Name").sortable(),
    ColumnDef::new("base_unit", "Base unit"),
    ColumnDef::new("operator", "Operator").hidden(),
    ColumnDef::new("operation_value", "Operation value").hidden(),
    ColumnDef::new("conversion", "Conversion"),
    ColumnDef::new("status", "Status"),
    ColumnDef::new("created_at", "Created").sortable().hidden(),
];

impl Exportable for Unit {
    fn columns() -> &'static [ColumnDef] {
        COLUMNS
    }

    fn cell(&self, key: &str) -> String {
        match key {
            "code" => self.code.clone(),
            "name" => self.name.clone(),
            "base_unit" => self.base_unit_name.clone().unwrap_or_default(),
            "operator" => self
                .base_unit
                .and(self.operator)
                .map(|o| o.code().to_string())
                .unwrap_or_default(),
            "operation_value" => self
                .base_unit
                .and(self.operation_value)
                .map(quantity)
                .unwrap_or_default(),
            "conversion" => self.conversion_label(None),
            "status" => (if self.is_active { "Active" } else { "Inactive" }).to_string(),
            "created_at" => self.metadata.created_display(),
            _ => String::new(),
        }
    }
}

impl Faceted for Unit {
    fn facet_value(&self, facet: Facet) -> Option<bool> {
        match facet {
            Facet::Status => Some(self.is_active),
            Facet::Featured => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(json: &str) -> Unit {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parses_backend_shape() {
        let u = unit(
            r#"{"id":2,"code":"box","name":"Box","base_unit":"1","base_unit_name":"Piece","operator":"*","operation_value":"12","is_active":1}"#,
        );
        assert_eq!(u.base_unit, Some(1));
        assert_eq!(u.operator, Some(UnitOperator::Multiply));
        assert_eq!(u.operation_value, Some(12.0));
        assert!(u.is_active);
    }

    #[test]
    fn test_conversion_multiply_and_divide() {
        let boxes = unit(r#"{"id":2,"name":"Box","base_unit":1,"operator":"*","operation_value":12}"#);
        assert_eq!(boxes.to_base(2.0), 24.0);
        assert_eq!(boxes.from_base(24.0), 2.0);
        assert_eq!(boxes.conversion_label(Some("Piece")), "1 Box = 12 Piece");

        let gram = unit(r#"{"id":3,"name":"Gram","base_unit":4,"operator":"/","operation_value":1000}"#);
        assert_eq!(gram.to_base(500.0), 0.5);
        assert_eq!(gram.from_base(0.5), 500.0);
        assert_eq!(gram.conversion_label(Some("Kilogram")), "1 Gram = 0.001 Kilogram");
    }

    #[test]
    fn test_operator_ignored_without_base() {
        let piece = unit(r#"{"id":1,"name":"Piece","operator":"*","operation_value":5}"#);
        assert!(piece.is_base());
        assert_eq!(piece.to_base(3.0), 3.0);
        assert_eq!(piece.conversion_label(Some("x")), "");
        assert_eq!(piece.cell("operator"), "");
        assert!(piece.is_active);
    }

    #[test]
    fn test_empty_operator_is_none() {
        let piece = unit(r#"{"id":1,"name":"Piece","operator":"","operation_value":null}"#);
        assert_eq!(piece.operator, None);
    }
}
