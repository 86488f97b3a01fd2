//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend API settings.
    pub api: ApiConfig,

    /// Search-history persistence settings.
    pub history: HistoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is appended to (e.g., "http://localhost:8080/api").
    pub base_url: String,

    /// Optional per-request timeout in seconds. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: None,
            user_agent: concat!("lolgg-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Search-history storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// File backing the key-value storage.
    pub storage_path: String,

    /// Storage key holding the serialized history list.
    pub key: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_path: "lolgg_storage.json".to_string(),
            key: crate::history::HISTORY_KEY.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Serve a Prometheus scrape endpoint for the lifetime of the process.
    pub metrics_enabled: bool,

    /// Scrape endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert!(config.api.request_timeout_secs.is_none());
        assert_eq!(config.history.key, "lolgg_search_history");
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.metrics_enabled);
        assert_eq!(config.observability.metrics_address, "127.0.0.1:9090");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://stats.example.com/api"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://stats.example.com/api");
        assert_eq!(config.api.request_timeout_secs, Some(5));
        assert!(config.api.user_agent.starts_with("lolgg-client/"));
        assert_eq!(config.history.storage_path, "lolgg_storage.json");
    }
}
