use serde::Deserialize;

/// Client configuration, compiled into the frontend bundle from `config.toml`.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub permissions: PermissionsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Absolute base URL. Empty means same host as the page on `port`.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<u32>,
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DialogConfig {
    /// Upper bound for the close animation before the row is cleared anyway.
    #[serde(default = "default_exit_fallback_ms")]
    pub exit_fallback_ms: u32,
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PermissionsConfig {
    #[serde(default = "default_grants")]
    pub granted: Vec<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_page_size_options() -> Vec<u32> {
    vec![10, 20, 50, 100]
}

fn default_debounce_ms() -> u32 {
    500
}

fn default_exit_fallback_ms() -> u32 {
    500
}

fn default_toast_ms() -> u32 {
    4000
}

fn default_grants() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: default_port(),
            prefix: default_prefix(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            search_debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            exit_fallback_ms: default_exit_fallback_ms(),
            toast_ms: default_toast_ms(),
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            granted: default_grants(),
        }
    }
}

/// Default configuration, mirrored by the repository `config.toml`
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 3000
prefix = "/api"

[list]
default_page_size = 10
page_size_options = [10, 20, 50, 100]
search_debounce_ms = 500

[dialog]
exit_fallback_ms = 500
toast_ms = 4000

[permissions]
granted = ["*"]
"#;

impl ClientConfig {
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: ClientConfig = toml::from_str(contents)?;
        config.normalize();
        Ok(config)
    }

    /// The default page size must be one of the offered options.
    fn normalize(&mut self) {
        if self.list.default_page_size == 0 {
            self.list.default_page_size = default_page_size();
        }
        self.list.page_size_options.retain(|s| *s > 0);
        if !self
            .list
            .page_size_options
            .contains(&self.list.default_page_size)
        {
            self.list
                .page_size_options
                .push(self.list.default_page_size);
        }
        self.list.page_size_options.sort_unstable();
        self.list.page_size_options.dedup();
    }

    /// Resolve the API root for a page served from `host`.
    pub fn api_root(&self, protocol: &str, hostname: &str) -> String {
        let base = self.api.base_url.trim_end_matches('/');
        let prefix = self.api.prefix.trim_end_matches('/');
        if base.is_empty() {
            format!("{protocol}//{hostname}:{}{prefix}", self.api.port)
        } else {
            format!("{base}{prefix}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = ClientConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.list.default_page_size, 10);
        assert_eq!(config.list.search_debounce_ms, 500);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = ClientConfig::from_toml("[api]\nport = 8080\n").unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.list.page_size_options, vec![10, 20, 50, 100]);
        assert_eq!(config.permissions.granted, vec!["*".to_string()]);
    }

    #[test]
    fn test_default_page_size_added_to_options() {
        let config =
            ClientConfig::from_toml("[list]\ndefault_page_size = 25\npage_size_options = [50, 10]\n")
                .unwrap();
        assert_eq!(config.list.page_size_options, vec![10, 25, 50]);
    }

    #[test]
    fn test_api_root() {
        let config = ClientConfig::default();
        assert_eq!(
            config.api_root("http:", "localhost"),
            "http://localhost:3000/api"
        );
        let config =
            ClientConfig::from_toml("[api]\nbase_url = \"https://shop.example.com/\"\n").unwrap();
        assert_eq!(
            config.api_root("http:", "localhost"),
            "https://shop.example.com/api"
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(ClientConfig::from_toml("[list\n").is_err());
    }
}
