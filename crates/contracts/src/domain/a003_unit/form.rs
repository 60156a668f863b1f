//! Create/edit form state for units and its validation.

use super::aggregate::{Unit, UnitId, UnitOperator};
use crate::shared::combobox::{parse_selection, StaticOptions};
use crate::shared::form_payload::FormPayload;
use crate::shared::validation::{parse_decimal, FieldErrors};

/// Fields the unit dialog shows errors for inline.
pub const FORM_FIELDS: &[&str] = &["code", "name", "base_unit", "operator", "operation_value"];

/// Raw form values as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitForm {
    pub code: String,
    pub name: String,
    /// Combobox value of the base unit; empty when none.
    pub base_unit: String,
    pub operator: String,
    pub operation_value: String,
    pub is_active: bool,
}

impl Default for UnitForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            base_unit: String::new(),
            operator: UnitOperator::Multiply.code().to_string(),
            operation_value: String::new(),
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseConversion {
    pub unit_id: i64,
    pub operator: UnitOperator,
    pub value: f64,
}

/// Validated unit ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDraft {
    pub code: String,
    pub name: String,
    pub base: Option<BaseConversion>,
    pub is_active: bool,
}

impl UnitForm {
    pub fn from_unit(unit: &Unit) -> Self {
        Self {
            code: unit.code.clone(),
            name: unit.name.clone(),
            base_unit: unit.base_unit.map(|id| id.to_string()).unwrap_or_default(),
            operator: unit
                .operator
                .unwrap_or(UnitOperator::Multiply)
                .code()
                .to_string(),
            operation_value: unit
                .operation_value
                .map(|v| v.to_string())
                .unwrap_or_default(),
            is_active: unit.is_active,
        }
    }

    /// `editing` is the id of the unit being edited, if any.
    pub fn validate(&self, editing: Option<UnitId>) -> Result<UnitDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let code = self.code.trim().to_string();
        let name = self.name.trim().to_string();
        if code.is_empty() {
            errors.add("code", "The code field is required.");
        }
        if name.is_empty() {
            errors.add("name", "The name field is required.");
        }

        let base_id = parse_selection(&self.base_unit);
        let mut base = None;
        if let Some(base_id) = base_id {
            if editing.is_some_and(|id| id.0 == base_id) {
                errors.add("base_unit", "A unit cannot be its own base unit.");
            }
            let operator = UnitOperator::from_code(self.operator.trim());
            if operator.is_none() {
                errors.add("operator", "Choose an operator.");
            }
            let value = match parse_decimal(&self.operation_value) {
                Ok(Some(v)) if v > 0.0 => Some(v),
                Ok(Some(_)) => {
                    errors.add("operation_value", "The operation value must be greater than 0.");
                    None
                }
                Ok(None) => {
                    errors.add(
                        "operation_value",
                        "The operation value is required when a base unit is set.",
                    );
                    None
                }
                Err(msg) => {
                    errors.add("operation_value", format!("The operation value {msg}."));
                    None
                }
            };
            if let (Some(operator), Some(value)) = (operator, value) {
                base = Some(BaseConversion {
                    unit_id: base_id,
                    operator,
                    value,
                });
            }
        }

        errors.into_result()?;
        Ok(UnitDraft {
            code,
            name,
            base,
            is_active: self.is_active,
        })
    }
}

impl UnitDraft {
    /// Operator and value are cleared when no base unit is chosen.
    pub fn to_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        payload
            .text("code", &self.code)
            .text("name", &self.name)
            .opt_number("base_unit", self.base.map(|b| b.unit_id))
            .opt_text("operator", self.base.map(|b| b.operator.code()))
            .opt_number("operation_value", self.base.map(|b| b.value))
            .flag("is_active", self.is_active);
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::error::ApiError;

    #[test]
    fn test_active_flag_error_is_unbound() {
        let err = ApiError::from_response(422, r#"{"errors":{"is_active":["invalid"]}}"#);
        assert_eq!(
            err.field_errors().unwrap().first_unbound(FORM_FIELDS),
            Some("invalid")
        );
    }

    fn form() -> UnitForm {
        UnitForm {
            code: "box".into(),
            name: "Box".into(),
            ..UnitForm::default()
        }
    }

    #[test]
    fn test_base_unit_requires_positive_value() {
        let mut f = form();
        f.base_unit = "1".into();
        f.operation_value = "0".into();
        let errors = f.validate(None).unwrap_err();
        assert_eq!(
            errors.first("operation_value"),
            Some("The operation value must be greater than 0.")
        );

        f.operation_value = "12".into();
        let draft = f.validate(None).unwrap();
        assert_eq!(
            draft.base,
            Some(BaseConversion {
                unit_id: 1,
                operator: UnitOperator::Multiply,
                value: 12.0
            })
        );
    }

    #[test]
    fn test_unit_cannot_be_own_base() {
        let mut f = form();
        f.base_unit = "5".into();
        f.operation_value = "2".into();
        let errors = f.validate(Some(UnitId(5))).unwrap_err();
        assert!(errors.contains("base_unit"));
    }

    #[test]
    fn test_payload_clears_conversion_without_base() {
        let mut f = form();
        f.operation_value = "99".into();
        let payload = f.validate(None).unwrap().to_payload();
        assert_eq!(payload.get("base_unit"), Some(""));
        assert_eq!(payload.get("operator"), Some(""));
        assert_eq!(payload.get("operation_value"), Some(""));
        assert_eq!(payload.get("is_active"), Some("1"));
    }

    #[test]
    fn test_required_fields() {
        let errors = UnitForm::default().validate(None).unwrap_err();
        assert!(errors.contains("code"));
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_from_unit_round_trips() {
        let unit: Unit = serde_json::from_str(
            r#"{"id":2,"code":"box","name":"Box","base_unit":1,"operator":"/","operation_value":4}"#,
        )
        .unwrap();
        let f = UnitForm::from_unit(&unit);
        assert_eq!(f.base_unit, "1");
        assert_eq!(f.operator, "/");
        let draft = f.validate(Some(unit.id)).unwrap();
        assert_eq!(draft.base.map(|b| b.value), Some(4.0));
    }
}
