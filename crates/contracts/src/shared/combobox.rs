//! Options and filtering for searchable selects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboOption {
    pub value: String,
    pub label: String,
    /// Secondary text rendered dimmed next to the label (code, path, ...).
    #[serde(default)]
    pub hint: Option<String>,
}

impl ComboOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        let hint = hint.into();
        self.hint = (!hint.is_empty()).then_some(hint);
        self
    }

    fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self
                .hint
                .as_deref()
                .is_some_and(|h| h.to_lowercase().contains(needle))
    }
}

/// Case-insensitive substring filter on label and hint.
pub fn filter_options<'a>(options: &'a [ComboOption], text: &str) -> Vec<&'a ComboOption> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    options.iter().filter(|o| o.matches(&needle)).collect()
}

pub fn find_label<'a>(options: &'a [ComboOption], value: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|o| o.value == value)
        .map(|o| o.label.as_str())
}

/// Combobox values are strings; record references are positive integers.
pub fn parse_selection(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

/// A closed set of values rendered as a static combobox or select.
pub trait StaticOptions: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }
}

pub fn options<T: StaticOptions>() -> Vec<ComboOption> {
    T::ALL
        .iter()
        .map(|v| ComboOption::new(v.code(), v.label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive() {
        let opts = vec![
            ComboOption::new("1", "Piece").with_hint("pc"),
            ComboOption::new("2", "Kilogram").with_hint("kg"),
            ComboOption::new("3", "Gram"),
        ];
        let found: Vec<_> = filter_options(&opts, "GRAM").iter().map(|o| o.value.as_str()).collect();
        assert_eq!(found, vec!["2", "3"]);
        assert_eq!(filter_options(&opts, "PC").len(), 1);
        assert_eq!(filter_options(&opts, "  ").len(), 3);
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("12"), Some(12));
        assert_eq!(parse_selection(""), None);
        assert_eq!(parse_selection("0"), None);
        assert_eq!(parse_selection("x"), None);
    }

    #[test]
    fn test_find_label() {
        let opts = vec![ComboOption::new("a", "Alpha")];
        assert_eq!(find_label(&opts, "a"), Some("Alpha"));
        assert_eq!(find_label(&opts, "b"), None);
    }
}
