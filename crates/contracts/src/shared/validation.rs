//! Field-level validation errors shared by client-side checks and HTTP 422 bodies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered map `field -> messages`.
///
/// Server keys for nested collections arrive dotted (`product_list.0.qty`);
/// they are kept verbatim and looked up either exactly or by prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let cleaned = map
            .into_iter()
            .filter(|(_, messages)| !messages.is_empty())
            .collect();
        Self(cleaned)
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// First message for an exact field name.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// First message for the field itself or any of its dotted children.
    pub fn first_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| covers(prefix, key))
            .and_then(|(_, messages)| messages.first())
            .map(String::as_str)
    }

    /// First message of a field none of `bound` covers, i.e. one no form
    /// control would show inline.
    pub fn first_unbound(&self, bound: &[&str]) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| !bound.iter().any(|b| covers(b, key)))
            .and_then(|(_, messages)| messages.first())
            .map(String::as_str)
    }

    /// Drop errors for one field, e.g. when the user edits it again.
    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// `product_list` covers `product_list` and `product_list.0.qty`, not `product_lists`.
fn covers(field: &str, key: &str) -> bool {
    key.strip_prefix(field)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

/// Parse a decimal typed by the user. Empty input is `Ok(None)`.
pub fn parse_decimal(raw: &str) -> Result<Option<f64>, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err("must be a number"),
    }
}

/// Parse a whole number typed by the user. Empty input is `Ok(None)`.
pub fn parse_whole(raw: &str) -> Result<Option<u32>, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| "must be a whole number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_returns_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("name", "The name must be a string.");
        assert_eq!(errors.first("name"), Some("The name field is required."));
        assert_eq!(errors.first("code"), None);
    }

    #[test]
    fn test_prefix_lookup_for_nested_keys() {
        let mut map = BTreeMap::new();
        map.insert(
            "product_list.1.qty".to_string(),
            vec!["Quantity must be positive.".to_string()],
        );
        let errors = FieldErrors::from_map(map);
        assert_eq!(
            errors.first_with_prefix("product_list"),
            Some("Quantity must be positive.")
        );
        assert_eq!(errors.first_with_prefix("product"), None);
    }

    #[test]
    fn test_first_unbound_skips_covered_keys() {
        let mut errors = FieldErrors::new();
        errors.add("name", "The name field is required.");
        errors.add("product_list.0.qty", "Quantity must be positive.");
        assert_eq!(errors.first_unbound(&["name", "product_list"]), None);

        errors.add("is_active", "The is active field must be true or false.");
        assert_eq!(
            errors.first_unbound(&["name", "product_list"]),
            Some("The is active field must be true or false.")
        );

        let mut nested = FieldErrors::new();
        nested.add("product_list.0.qty", "Quantity must be positive.");
        assert_eq!(
            nested.first_unbound(&["product"]),
            Some("Quantity must be positive.")
        );
    }

    #[test]
    fn test_empty_message_lists_are_dropped() {
        let mut map = BTreeMap::new();
        map.insert("name".to_string(), Vec::new());
        assert!(FieldErrors::from_map(map).is_empty());
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("12,5"), Ok(Some(12.5)));
        assert_eq!(parse_decimal("  "), Ok(None));
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("inf").is_err());
    }

    #[test]
    fn test_parse_whole() {
        assert_eq!(parse_whole("12"), Ok(Some(12)));
        assert_eq!(parse_whole(""), Ok(None));
        assert!(parse_whole("-1").is_err());
    }
}
