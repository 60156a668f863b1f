//! Client configuration compiled into the bundle from the repository `config.toml`.

use contracts::shared::config::{ClientConfig, DEFAULT_CONFIG};
use contracts::shared::list_query::ListSpec;
use contracts::shared::permissions::Permissions;
use once_cell::sync::Lazy;

const BUNDLED_CONFIG: &str = include_str!("../../../../config.toml");

static CONFIG: Lazy<ClientConfig> = Lazy::new(|| {
    ClientConfig::from_toml(BUNDLED_CONFIG).unwrap_or_else(|e| {
        log::warn!("config.toml is invalid, using defaults: {e}");
        ClientConfig::from_toml(DEFAULT_CONFIG).unwrap_or_default()
    })
});

static PERMISSIONS: Lazy<Permissions> =
    Lazy::new(|| Permissions::from_grants(&CONFIG.permissions.granted));

pub fn config() -> &'static ClientConfig {
    &CONFIG
}

pub fn permissions() -> &'static Permissions {
    &PERMISSIONS
}

/// Entity list spec with the configured default page size.
pub fn list_spec(spec: ListSpec) -> ListSpec {
    spec.with_page_size(CONFIG.list.default_page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_parses() {
        let config = ClientConfig::from_toml(BUNDLED_CONFIG).expect("bundled config");
        assert!(config
            .list
            .page_size_options
            .contains(&config.list.default_page_size));
    }
}
