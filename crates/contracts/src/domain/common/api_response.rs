//! Response envelope `{data, message, meta?}` used by every endpoint.

use crate::shared::error::ApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

/// Server-side pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub last_page: u32,
    #[serde(default)]
    pub from: Option<u64>,
    #[serde(default)]
    pub to: Option<u64>,
}

impl PageMeta {
    /// Metadata for a response that came without `meta`.
    pub fn single_page(rows: usize) -> Self {
        let rows = rows as u64;
        Self {
            current_page: 1,
            per_page: rows.max(1) as u32,
            total: rows,
            last_page: 1,
            from: (rows > 0).then_some(1),
            to: (rows > 0).then_some(rows),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// `Showing 11 to 20 of 45`
    pub fn range_label(&self) -> String {
        match (self.from, self.to) {
            (Some(from), Some(to)) if self.total > 0 => {
                format!("Showing {} to {} of {}", from, to, self.total)
            }
            _ => "No results".to_string(),
        }
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub rows: Vec<T>,
    pub meta: PageMeta,
}

impl<T> ListPage<T> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Parse and validate an envelope; a shape mismatch is a schema error.
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, ApiError> {
    serde_json::from_str(body).map_err(ApiError::schema)
}

pub fn parse_list<T: DeserializeOwned>(body: &str) -> Result<ListPage<T>, ApiError> {
    let envelope: ApiResponse<Vec<T>> = parse_envelope(body)?;
    let meta = envelope
        .meta
        .unwrap_or_else(|| PageMeta::single_page(envelope.data.len()));
    Ok(ListPage {
        rows: envelope.data,
        meta,
    })
}

/// Mutation responses carry a message and an arbitrary (ignored) payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    #[test]
    fn test_parse_list_with_meta() {
        let body = r#"{"data":[{"id":1,"name":"Kg"}],"message":"ok","meta":{"current_page":2,"per_page":10,"total":11,"last_page":2,"from":11,"to":11}}"#;
        let page: ListPage<Row> = parse_list(body).unwrap();
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.meta.current_page, 2);
        assert!(page.meta.has_prev());
        assert!(!page.meta.has_next());
        assert_eq!(page.meta.range_label(), "Showing 11 to 11 of 11");
    }

    #[test]
    fn test_missing_meta_is_single_page() {
        let page: ListPage<Row> = parse_list(r#"{"data":[]}"#).unwrap();
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.range_label(), "No results");
    }

    #[test]
    fn test_shape_mismatch_is_schema_error() {
        let err = parse_list::<Row>(r#"{"data":[{"id":"x"}]}"#).unwrap_err();
        assert!(matches!(err, ApiError::Schema(_)));
    }

    #[test]
    fn test_mutation_message_fallback() {
        let resp: MutationResponse = serde_json::from_str(r#"{"message":""}"#).unwrap();
        assert_eq!(resp.message_or("Saved"), "Saved");
    }
}
