//! API utilities for frontend-backend communication

use super::config::config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the config when set, otherwise the page host
/// on the configured backend port, e.g. `http://localhost:3000/api`.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return config().api_root("http:", "127.0.0.1"),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    config().api_root(&protocol, &hostname)
}

/// Build a full API URL from a resource path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/units/base");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}/{}", api_base(), path.trim_start_matches('/'))
}

/// Append url-encoded query parameters.
pub fn with_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_encodes_values() {
        let params = vec![
            ("search".to_string(), "red & blue".to_string()),
            ("page".to_string(), "2".to_string()),
        ];
        assert_eq!(
            with_query("http://h/api/products", &params),
            "http://h/api/products?search=red%20%26%20blue&page=2"
        );
        assert_eq!(with_query("http://h/api/units", &[]), "http://h/api/units");
    }
}
