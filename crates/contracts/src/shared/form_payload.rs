//! Flat key/value representation of a multipart form body.
//!
//! Nested collections use indexed bracket keys (`product_list[0][qty]`),
//! booleans are sent as `"1"`/`"0"` and a cleared optional value is sent
//! as an empty string so the backend can null it. Files are attached by
//! the frontend; this type only carries text parts.

use serde::Serialize;

/// Hidden field used to tunnel PUT through a multipart POST.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn flag(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.text(key, if value { "1" } else { "0" })
    }

    pub fn number(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.text(key, value.to_string())
    }

    /// `None` becomes an empty string.
    pub fn opt_text(&mut self, key: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.text(key, value.unwrap_or_default())
    }

    pub fn opt_number<N: ToString>(
        &mut self,
        key: impl Into<String>,
        value: Option<N>,
    ) -> &mut Self {
        self.text(key, value.map(|v| v.to_string()).unwrap_or_default())
    }

    /// Append `prefix[index][key]` parts for one collection row.
    pub fn nested(
        &mut self,
        prefix: &str,
        index: usize,
        parts: impl IntoIterator<Item = (&'static str, String)>,
    ) -> &mut Self {
        for (key, value) in parts {
            self.text(format!("{prefix}[{index}][{key}]"), value);
        }
        self
    }

    pub fn method_override(&mut self, method: &str) -> &mut Self {
        self.text(METHOD_OVERRIDE_FIELD, method)
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_and_optionals() {
        let mut payload = FormPayload::new();
        payload
            .flag("is_active", true)
            .flag("featured", false)
            .opt_text("description", None)
            .opt_number::<f64>("alert_quantity", None)
            .opt_number("cost", Some(2.5));
        assert_eq!(payload.get("is_active"), Some("1"));
        assert_eq!(payload.get("featured"), Some("0"));
        assert_eq!(payload.get("description"), Some(""));
        assert_eq!(payload.get("alert_quantity"), Some(""));
        assert_eq!(payload.get("cost"), Some("2.5"));
    }

    #[test]
    fn test_nested_rows_use_bracket_keys() {
        let mut payload = FormPayload::new();
        payload.nested(
            "product_list",
            1,
            [("product_id", "5".to_string()), ("qty", "2".to_string())],
        );
        assert_eq!(payload.get("product_list[1][product_id]"), Some("5"));
        assert_eq!(payload.get("product_list[1][qty]"), Some("2"));
    }

    #[test]
    fn test_method_override() {
        let mut payload = FormPayload::new();
        payload.method_override("PUT");
        assert_eq!(payload.get("_method"), Some("PUT"));
    }
}
