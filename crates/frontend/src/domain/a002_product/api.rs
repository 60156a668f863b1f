use crate::shared::crud::fetch_dropdown;
use crate::shared::http;
use contracts::domain::a002_product::ProductSearchItem;
use contracts::domain::common::DropdownItem;
use contracts::shared::error::ApiError;
use serde_json::Value;

/// `GET /products/search-combo?search=`: products and variants for combo lines.
pub async fn search_combo(search: String) -> Result<Vec<ProductSearchItem>, ApiError> {
    let search = search.trim().to_string();
    if search.is_empty() {
        return Ok(Vec::new());
    }
    http::get_data("products/search-combo", &[("search".to_string(), search)]).await
}

/// `GET /products/sale-unit/{unit_id}`: units convertible to `unit_id`.
pub async fn fetch_sale_units(unit_id: i64) -> Result<Vec<DropdownItem>, ApiError> {
    http::get_data(&format!("products/sale-unit/{unit_id}"), &[]).await
}

/// `GET /products/generate-code`. The code may arrive as a string or a number.
pub async fn generate_code() -> Result<String, ApiError> {
    let data: Value = http::get_data("products/generate-code", &[]).await?;
    code_from_value(&data)
        .ok_or_else(|| ApiError::Schema(format!("unexpected product code: {data}")))
}

fn code_from_value(data: &Value) -> Option<String> {
    match data {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("code").and_then(code_from_value),
        _ => None,
    }
}

/// Warehouses as `(id, name)` pairs for the price and stock editors.
pub async fn fetch_warehouses() -> Result<Vec<(i64, String)>, ApiError> {
    let items = fetch_dropdown("warehouses").await?;
    Ok(items.into_iter().map(|w| (w.id, w.name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_from_value() {
        assert_eq!(code_from_value(&json!("48213377")), Some("48213377".to_string()));
        assert_eq!(code_from_value(&json!(48213377)), Some("48213377".to_string()));
        assert_eq!(code_from_value(&json!({"code": "A1"})), Some("A1".to_string()));
        assert_eq!(code_from_value(&json!("  ")), None);
        assert_eq!(code_from_value(&json!(null)), None);
    }
}
