//! Connection settings for the OpenSearch document store.

use std::env;
use std::time::Duration;
use tracing::warn;

use crate::schema::DEFAULT_INDEX_NAME;

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default connection retry interval in seconds.
pub const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Connection mode for OpenSearch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection at a fixed interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse a connection mode.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fail-fast" | "failfast" | "fail_fast" => Some(Self::FailFast),
            "retry" => Some(Self::Retry),
            _ => None,
        }
    }

    /// Read `OPENSEARCH_CONNECTION_MODE`, falling back to `default` when unset or invalid.
    pub fn from_env(default: Self) -> Self {
        match env::var("OPENSEARCH_CONNECTION_MODE") {
            Ok(value) => Self::parse(&value).unwrap_or_else(|| {
                warn!(
                    value = %value,
                    default = ?default,
                    "Invalid OPENSEARCH_CONNECTION_MODE, using default"
                );
                default
            }),
            Err(_) => default,
        }
    }
}

/// Settings needed to reach the product index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSearchConfig {
    /// The OpenSearch server URL (e.g., "http://localhost:9200").
    pub url: String,
    /// Optional basic-auth user name.
    pub username: Option<String>,
    /// Optional basic-auth password.
    pub password: Option<String>,
    /// Name of the product index.
    pub index_name: String,
    /// Behaviour when the server cannot be reached at startup.
    pub connection_mode: ConnectionMode,
    /// Delay between connection attempts in `Retry` mode.
    pub retry_interval: Duration,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPENSEARCH_URL.to_string(),
            username: None,
            password: None,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            connection_mode: ConnectionMode::Retry,
            retry_interval: Duration::from_secs(DEFAULT_RETRY_INTERVAL_SECS),
        }
    }
}

impl OpenSearchConfig {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME` / `OPENSEARCH_PASSWORD`: Basic auth credentials (optional)
    /// - `PRODUCTS_INDEX`: Index name (default: "products")
    /// - `OPENSEARCH_CONNECTION_MODE`: "fail-fast" or "retry" (default: `default_mode`)
    /// - `OPENSEARCH_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    pub fn from_env(default_mode: ConnectionMode) -> Self {
        let retry_interval = env::var("OPENSEARCH_RETRY_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_INTERVAL_SECS);

        Self {
            url: env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string()),
            username: non_empty_var("OPENSEARCH_USERNAME"),
            password: non_empty_var("OPENSEARCH_PASSWORD"),
            index_name: non_empty_var("PRODUCTS_INDEX")
                .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            connection_mode: ConnectionMode::from_env(default_mode),
            retry_interval: Duration::from_secs(retry_interval),
        }
    }

    /// Basic-auth credentials, present only when a user name is configured.
    pub fn credentials(&self) -> Option<(String, String)> {
        self.username
            .as_ref()
            .map(|user| (user.clone(), self.password.clone().unwrap_or_default()))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
