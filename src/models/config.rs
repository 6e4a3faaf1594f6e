//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::cache::DEFAULT_CACHE_DURATION_MS;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub app_name: String,
    /// Base URL of the remote content API the admin panel mirrors.
    pub api_base_url: String,
    pub address: String,
    pub port: u16,
    /// JSON document the in-memory store is seeded from; empty store when unset.
    #[serde(default)]
    pub seed_path: Option<String>,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    #[serde(default = "default_cache_duration_ms")]
    pub cache_duration_ms: i64,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    /// Recorded as `blocked_by` on blacklist entries.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_cache_duration_ms() -> i64 {
    DEFAULT_CACHE_DURATION_MS
}

fn default_toast_duration_ms() -> u64 {
    5_000
}

fn default_admin_username() -> String {
    "admin".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let config: ServerConfig = serde_json::from_str(
            r#"{"app_name": "CMS", "api_base_url": "http://localhost:3000/api",
                "address": "127.0.0.1", "port": 8080}"#,
        )
        .unwrap();

        assert_eq!(config.seed_path, None);
        assert_eq!(config.items_per_page, 10);
        assert_eq!(config.cache_duration_ms, 300_000);
        assert_eq!(config.toast_duration_ms, 5_000);
        assert_eq!(config.admin_username, "admin");
    }
}
