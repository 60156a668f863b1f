use crate::shared::dialog::submit::FormSubmitter;
use crate::shared::dialog::DialogContext;
use contracts::domain::a003_unit::form::FORM_FIELDS;
use contracts::domain::a003_unit::{Unit, UnitForm, UnitId, UnitOperator};
use contracts::domain::common::serde_helpers::quantity;
use contracts::shared::combobox::{parse_selection, StaticOptions};
use contracts::shared::validation::parse_decimal;
use leptos::prelude::*;

/// `1 Box = 12 Piece` for the values currently typed, if complete.
pub fn conversion_preview(form: &UnitForm, base_name: Option<&str>) -> Option<String> {
    parse_selection(&form.base_unit)?;
    let base_name = base_name?;
    let value = parse_decimal(&form.operation_value).ok().flatten().filter(|v| *v > 0.0)?;
    let factor = match UnitOperator::from_code(&form.operator)? {
        UnitOperator::Multiply => value,
        UnitOperator::Divide => 1.0 / value,
    };
    let name = if form.name.trim().is_empty() {
        "unit"
    } else {
        form.name.trim()
    };
    Some(format!("1 {name} = {} {base_name}", quantity(factor)))
}

/// ViewModel of the unit add/edit dialog
#[derive(Clone, Copy)]
pub struct UnitDetailsViewModel {
    pub form: RwSignal<UnitForm>,
    /// Row being edited; `None` when adding
    pub editing: RwSignal<Option<Unit>>,
    pub submit: FormSubmitter,
}

impl UnitDetailsViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(UnitForm::default()),
            editing: RwSignal::new(None),
            submit: FormSubmitter::new(FORM_FIELDS),
        }
    }

    /// Fresh state for each opening; nothing typed in a previous
    /// session survives.
    pub fn reset(&self, row: Option<Unit>) {
        self.form.set(row.as_ref().map(UnitForm::from_unit).unwrap_or_default());
        self.editing.set(row);
        self.submit.reset();
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.with(Option::is_some)
    }

    pub fn editing_id(&self) -> Option<UnitId> {
        self.editing.with_untracked(|e| e.as_ref().map(|u| u.id))
    }

    pub fn title(&self) -> String {
        if self.is_edit_mode() {
            "Edit Unit".to_string()
        } else {
            "Add Unit".to_string()
        }
    }

    pub fn set_base_unit(&self, value: Option<String>) {
        self.form.update(|f| {
            f.base_unit = value.unwrap_or_default();
            if f.base_unit.is_empty() {
                f.operation_value.clear();
                f.operator = UnitOperator::Multiply.code().to_string();
            }
        });
        self.submit.clear_field("base_unit");
    }

    pub fn save_command(&self, dialog: DialogContext<Unit>) {
        let editing = self.editing_id();
        let draft = match self.form.with_untracked(|f| f.validate(editing)) {
            Ok(draft) => draft,
            Err(errors) => {
                self.submit.reject(errors);
                return;
            }
        };
        self.submit
            .save::<Unit, _>(editing, draft.to_payload(), Vec::new(), move || dialog.close());
    }
}

impl Default for UnitDetailsViewModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(base: &str, op: &str, value: &str) -> UnitForm {
        UnitForm {
            name: "Box".into(),
            base_unit: base.into(),
            operator: op.into(),
            operation_value: value.into(),
            ..UnitForm::default()
        }
    }

    #[test]
    fn test_preview_multiply() {
        assert_eq!(
            conversion_preview(&form("1", "*", "12"), Some("Piece")).as_deref(),
            Some("1 Box = 12 Piece")
        );
    }

    #[test]
    fn test_preview_divide() {
        assert_eq!(
            conversion_preview(&form("1", "/", "4"), Some("Kilogram")).as_deref(),
            Some("1 Box = 0.25 Kilogram")
        );
    }

    #[test]
    fn test_preview_needs_base_and_value() {
        assert_eq!(conversion_preview(&form("", "*", "12"), Some("Piece")), None);
        assert_eq!(conversion_preview(&form("1", "*", ""), Some("Piece")), None);
        assert_eq!(conversion_preview(&form("1", "*", "0"), Some("Piece")), None);
    }
}
