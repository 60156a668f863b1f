//! Lenient deserializers for backend fields that arrive as numbers, numeric
//! strings or booleans depending on the column type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// `true`, `1`, `"1"`, `"true"` are true; everything else (including null) is false.
pub fn flex_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"),
        _ => false,
    })
}

pub fn flex_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value).unwrap_or(0.0))
}

pub fn flex_f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_f64(&value))
}

pub fn flex_i64_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// Optional enum or struct that degrades to `None` on empty strings or
/// unknown values instead of failing the whole payload.
pub fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Fixed two-decimal rendering used for prices in tables and exports.
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Quantities drop trailing zeros: `2`, `2.5`, `0.125`.
pub fn quantity(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "flex_bool", default)]
        flag: bool,
        #[serde(deserialize_with = "flex_f64_opt", default)]
        price: Option<f64>,
        #[serde(deserialize_with = "flex_i64_opt", default)]
        id: Option<i64>,
    }

    #[test]
    fn test_accepts_strings_and_numbers() {
        let p: Probe = serde_json::from_str(r#"{"flag":"1","price":"12.50","id":"4"}"#).unwrap();
        assert!(p.flag);
        assert_eq!(p.price, Some(12.5));
        assert_eq!(p.id, Some(4));

        let p: Probe = serde_json::from_str(r#"{"flag":0,"price":null,"id":null}"#).unwrap();
        assert!(!p.flag);
        assert_eq!(p.price, None);
        assert_eq!(p.id, None);

        let p: Probe = serde_json::from_str("{}").unwrap();
        assert!(!p.flag);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(money(3.0), "3.00");
        assert_eq!(quantity(2.0), "2");
        assert_eq!(quantity(2.50), "2.5");
        assert_eq!(quantity(0.0), "0");
    }
}
