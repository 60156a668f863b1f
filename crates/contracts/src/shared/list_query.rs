//! URL-backed list state: search, filters, sorting and pagination.
//!
//! The URL query string is the source of truth for every list view.
//! [`QueryParams`] holds the raw parameters and implements the write rules
//! (filter edits reset the page, default values are removed), while
//! [`ListQuery`] is the typed view derived from them and sent to the API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PARAM_SEARCH: &str = "search";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_PAGE_SIZE: &str = "pageSize";
pub const PARAM_SORT_BY: &str = "sort_by";
pub const PARAM_SORT_DIR: &str = "sort_dir";

/// Parameter name the backend expects for the page size.
pub const API_PARAM_PER_PAGE: &str = "per_page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub by: String,
    pub dir: SortDir,
}

/// Static description of one list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    /// Entity-specific filter keys read from and written to the URL.
    pub filter_keys: &'static [&'static str],
    /// Columns the backend accepts in `sort_by`.
    pub sortable: &'static [&'static str],
    pub default_page_size: u32,
}

impl ListSpec {
    pub fn with_page_size(self, default_page_size: u32) -> Self {
        Self {
            default_page_size,
            ..self
        }
    }
}

/// Raw URL query parameters with the list-view write rules.
///
/// Unknown keys are preserved so other state sharing the URL survives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string with or without the leading `?`.
    /// Malformed input degrades to an empty set.
    pub fn parse(query: &str) -> Self {
        let trimmed = query.trim_start_matches('?');
        if trimmed.is_empty() {
            return Self::default();
        }
        let map: BTreeMap<String, String> = serde_qs::from_str(trimmed).unwrap_or_default();
        let cleaned = map
            .into_iter()
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self(cleaned)
    }

    /// Render as `key=value&...` without the leading `?`.
    pub fn to_query_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        serde_qs::to_string(&self.0).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn put(&mut self, key: &str, value: Option<String>) {
        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(v) => {
                self.0.insert(key.to_string(), v);
            }
            None => {
                self.0.remove(key);
            }
        }
    }

    fn reset_page(&mut self) {
        self.0.remove(PARAM_PAGE);
    }

    /// Write the search text. A changed search resets the page; the same
    /// text (after trimming) leaves the parameters untouched.
    pub fn set_search(&mut self, text: &str) {
        if self.get(PARAM_SEARCH).unwrap_or_default() == text.trim() {
            return;
        }
        self.put(PARAM_SEARCH, Some(text.to_string()));
        self.reset_page();
    }

    /// Write or clear a filter. Any filter change resets the page.
    pub fn set_filter(&mut self, key: &str, value: Option<String>) {
        self.put(key, value);
        self.reset_page();
    }

    /// Remove every filter declared by the `ListSpec` plus the search text.
    pub fn clear_filters(&mut self, spec: &ListSpec) {
        for key in spec.filter_keys {
            self.0.remove(*key);
        }
        self.0.remove(PARAM_SEARCH);
        self.reset_page();
    }

    /// 1-based page; page 1 is the default and is never written.
    pub fn set_page(&mut self, page: u32) {
        if page <= 1 {
            self.reset_page();
        } else {
            self.0.insert(PARAM_PAGE.to_string(), page.to_string());
        }
    }

    /// Page size equal to the declared default is removed from the URL.
    /// Changing the page size returns to the first page.
    pub fn set_page_size(&mut self, size: u32, spec: &ListSpec) {
        if size == 0 || size == spec.default_page_size {
            self.0.remove(PARAM_PAGE_SIZE);
        } else {
            self.0.insert(PARAM_PAGE_SIZE.to_string(), size.to_string());
        }
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        match sort {
            Some(sort) => {
                self.0.insert(PARAM_SORT_BY.to_string(), sort.by);
                self.0
                    .insert(PARAM_SORT_DIR.to_string(), sort.dir.as_str().to_string());
            }
            None => {
                self.0.remove(PARAM_SORT_BY);
                self.0.remove(PARAM_SORT_DIR);
            }
        }
    }

    /// Header click cycle: unsorted -> asc -> desc -> unsorted.
    pub fn toggle_sort(&mut self, field: &str) {
        let current = ListQuery::read_sort(self);
        let next = match current {
            Some(sort) if sort.by == field => match sort.dir {
                SortDir::Asc => Some(Sort {
                    by: field.to_string(),
                    dir: SortDir::Desc,
                }),
                SortDir::Desc => None,
            },
            _ => Some(Sort {
                by: field.to_string(),
                dir: SortDir::Asc,
            }),
        };
        self.set_sort(next);
    }
}

/// Typed list query derived from [`QueryParams`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<Sort>,
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn derive(params: &QueryParams, spec: &ListSpec) -> Self {
        let page = params
            .get(PARAM_PAGE)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let page_size = params
            .get(PARAM_PAGE_SIZE)
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|s| *s >= 1)
            .unwrap_or(spec.default_page_size);
        let sort = Self::read_sort(params).filter(|s| {
            spec.sortable.is_empty() || spec.sortable.contains(&s.by.as_str())
        });
        let filters = spec
            .filter_keys
            .iter()
            .filter_map(|key| params.get(key).map(|v| (key.to_string(), v.to_string())))
            .collect();

        Self {
            search: params.get(PARAM_SEARCH).unwrap_or_default().to_string(),
            page,
            page_size,
            sort,
            filters,
        }
    }

    fn read_sort(params: &QueryParams) -> Option<Sort> {
        let by = params.get(PARAM_SORT_BY)?;
        let dir = params
            .get(PARAM_SORT_DIR)
            .and_then(SortDir::parse)
            .unwrap_or(SortDir::Asc);
        Some(Sort {
            by: by.to_string(),
            dir,
        })
    }

    /// Minimal URL parameters for this query; defaults are omitted.
    pub fn to_params(&self, spec: &ListSpec) -> QueryParams {
        let mut params = QueryParams::new();
        for (key, value) in &self.filters {
            params.put(key, Some(value.clone()));
        }
        params.put(PARAM_SEARCH, Some(self.search.clone()));
        params.set_page_size(self.page_size, spec);
        params.set_page(self.page);
        params.set_sort(self.sort.clone());
        params
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Number of active user-facing filters (search counts as one).
    pub fn active_filter_count(&self) -> usize {
        self.filters.len() + usize::from(!self.search.trim().is_empty())
    }

    /// Parameters sent to the backend list endpoint.
    pub fn api_params(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(5 + self.filters.len());
        if !self.search.trim().is_empty() {
            out.push((PARAM_SEARCH.to_string(), self.search.trim().to_string()));
        }
        out.push((PARAM_PAGE.to_string(), self.page.to_string()));
        out.push((API_PARAM_PER_PAGE.to_string(), self.page_size.to_string()));
        if let Some(sort) = &self.sort {
            out.push((PARAM_SORT_BY.to_string(), sort.by.clone()));
            out.push((PARAM_SORT_DIR.to_string(), sort.dir.as_str().to_string()));
        }
        for (key, value) in &self.filters {
            out.push((key.clone(), value.clone()));
        }
        out
    }

    /// Canonical cache key: identical queries always produce identical keys.
    pub fn cache_key(&self) -> String {
        let mut key = format!(
            "search={}|page={}|size={}",
            self.search.trim(),
            self.page,
            self.page_size
        );
        if let Some(sort) = &self.sort {
            key.push_str(&format!("|sort={}:{}", sort.by, sort.dir.as_str()));
        }
        for (k, v) in &self.filters {
            key.push_str(&format!("|{k}={v}"));
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ListSpec = ListSpec {
        filter_keys: &["parent_id", "category_id"],
        sortable: &["name", "created_at"],
        default_page_size: 10,
    };

    #[test]
    fn test_derive_reads_all_parameters() {
        let params = QueryParams::parse(
            "?search=shirt&page=2&pageSize=20&sort_by=name&sort_dir=desc&parent_id=4&foo=bar",
        );
        let query = ListQuery::derive(&params, &SPEC);
        assert_eq!(query.search, "shirt");
        assert_eq!(query.page, 2);
        assert_eq!(query.page_size, 20);
        assert_eq!(
            query.sort,
            Some(Sort {
                by: "name".to_string(),
                dir: SortDir::Desc
            })
        );
        assert_eq!(query.filter("parent_id"), Some("4"));
        assert_eq!(query.filters.len(), 1);
    }

    #[test]
    fn test_round_trip_url_to_state_to_url() {
        let cases = [
            "",
            "search=hat",
            "page=3",
            "pageSize=50",
            "category_id=7&page=2&sort_by=created_at&sort_dir=asc",
            "parent_id=1&search=a&pageSize=20",
        ];
        for case in cases {
            let params = QueryParams::parse(case);
            let query = ListQuery::derive(&params, &SPEC);
            let rendered = query.to_params(&SPEC);
            let again = ListQuery::derive(&rendered, &SPEC);
            assert_eq!(query, again, "case {case:?}");
        }
    }

    #[test]
    fn test_default_page_size_removes_param() {
        let mut params = QueryParams::parse("pageSize=50&page=4");
        params.set_page_size(10, &SPEC);
        assert_eq!(params.get(PARAM_PAGE_SIZE), None);
        assert_eq!(params.get(PARAM_PAGE), None);
        assert_eq!(params.to_query_string(), "");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut params = QueryParams::parse("page=5&search=x");
        params.set_filter("parent_id", Some("3".to_string()));
        assert_eq!(params.get(PARAM_PAGE), None);
        assert_eq!(params.get("parent_id"), Some("3"));

        params.set_page(2);
        params.set_search("y");
        assert_eq!(params.get(PARAM_PAGE), None);
        assert_eq!(params.get(PARAM_SEARCH), Some("y"));
    }

    #[test]
    fn test_unchanged_search_keeps_page() {
        let mut params = QueryParams::parse("search=shirt&page=4");
        params.set_search(" shirt ");
        assert_eq!(params.get("page"), Some("4"));

        params.set_search("shirts");
        assert_eq!(params.get("search"), Some("shirts"));
        assert_eq!(params.get("page"), None);
    }

    #[test]
    fn test_clearing_filter_removes_key() {
        let mut params = QueryParams::parse("parent_id=3");
        params.set_filter("parent_id", None);
        assert!(params.is_empty());
        params.set_search("   ");
        assert!(params.get(PARAM_SEARCH).is_none());
    }

    #[test]
    fn test_page_one_is_not_written() {
        let mut params = QueryParams::new();
        params.set_page(1);
        assert!(params.is_empty());
        params.set_page(3);
        assert_eq!(params.get(PARAM_PAGE), Some("3"));
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let params = QueryParams::parse("page=abc&pageSize=0");
        let query = ListQuery::derive(&params, &SPEC);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_unknown_sort_column_is_ignored() {
        let params = QueryParams::parse("sort_by=password&sort_dir=asc");
        assert_eq!(ListQuery::derive(&params, &SPEC).sort, None);
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let mut params = QueryParams::new();
        params.toggle_sort("name");
        assert_eq!(params.get(PARAM_SORT_DIR), Some("asc"));
        params.toggle_sort("name");
        assert_eq!(params.get(PARAM_SORT_DIR), Some("desc"));
        params.toggle_sort("name");
        assert_eq!(params.get(PARAM_SORT_BY), None);
        params.toggle_sort("name");
        params.toggle_sort("created_at");
        assert_eq!(params.get(PARAM_SORT_BY), Some("created_at"));
        assert_eq!(params.get(PARAM_SORT_DIR), Some("asc"));
    }

    #[test]
    fn test_api_params_use_per_page() {
        let params = QueryParams::parse("search=%20tee%20&category_id=2");
        let query = ListQuery::derive(&params, &SPEC);
        let api = query.api_params();
        assert!(api.contains(&("per_page".to_string(), "10".to_string())));
        assert!(api.contains(&("search".to_string(), "tee".to_string())));
        assert!(api.contains(&("category_id".to_string(), "2".to_string())));
    }

    #[test]
    fn test_cache_key_is_canonical() {
        let a = ListQuery::derive(&QueryParams::parse("parent_id=1&search=x"), &SPEC);
        let b = ListQuery::derive(&QueryParams::parse("search=x&parent_id=1&page=1"), &SPEC);
        assert_eq!(a.cache_key(), b.cache_key());
        let c = ListQuery::derive(&QueryParams::parse("search=x&parent_id=2"), &SPEC);
        assert_ne!(a.cache_key(), c.cache_key());
    }

    #[test]
    fn test_clear_filters_keeps_sort_and_size() {
        let mut params =
            QueryParams::parse("parent_id=1&category_id=2&search=s&pageSize=20&sort_by=name");
        params.clear_filters(&SPEC);
        assert_eq!(params.get("parent_id"), None);
        assert_eq!(params.get(PARAM_SEARCH), None);
        assert_eq!(params.get(PARAM_PAGE_SIZE), Some("20"));
        assert_eq!(params.get(PARAM_SORT_BY), Some("name"));
    }
}
