use crate::shared::combobox::ComboOption;
use serde::{Deserialize, Serialize};

/// Minimal `{id, name}` projection returned by `/{resource}/dropdown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl DropdownItem {
    pub fn to_option(&self) -> ComboOption {
        ComboOption::new(self.id.to_string(), self.name.clone())
            .with_hint(self.code.clone().unwrap_or_default())
    }
}

pub fn to_options(items: &[DropdownItem]) -> Vec<ComboOption> {
    items.iter().map(DropdownItem::to_option).collect()
}

/// Body of a successful `/{resource}/import` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    #[serde(default)]
    pub imported: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ImportSummary {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn headline(&self) -> String {
        match (self.imported, self.errors.len()) {
            (n, 0) => format!("{n} record(s) imported"),
            (n, e) => format!("{n} record(s) imported, {e} row(s) failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropdown_option_carries_code_hint() {
        let item = DropdownItem {
            id: 3,
            name: "Kilogram".to_string(),
            code: Some("kg".to_string()),
        };
        let opt = item.to_option();
        assert_eq!(opt.value, "3");
        assert_eq!(opt.hint.as_deref(), Some("kg"));
    }

    #[test]
    fn test_import_headline() {
        let summary: ImportSummary =
            serde_json::from_str(r#"{"imported":5,"errors":["Row 3: name is required"]}"#).unwrap();
        assert!(!summary.is_clean());
        assert_eq!(summary.headline(), "5 record(s) imported, 1 row(s) failed");
    }
}
