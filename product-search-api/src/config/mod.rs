//! Server configuration and environment helpers.

mod dependencies;

pub use dependencies::Dependencies;

use axum::http::{header, HeaderValue, Method};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Default bind address.
pub const DEFAULT_SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default listen port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default upper bound on a request's lifetime in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST,
            port: DEFAULT_SERVER_PORT,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SERVER_HOST`: Bind address (default: 0.0.0.0)
    /// - `SERVER_PORT`: Listen port (default: 8080)
    /// - `REQUEST_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: any)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: parse_var("SERVER_HOST", defaults.host),
            port: parse_var("SERVER_PORT", defaults.port),
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|value| split_origins(&value))
                .unwrap_or_default(),
        }
    }

    /// The socket address to listen on.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %value, default = ?default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Create the CORS layer for the configured origins.
///
/// Only `GET` and `OPTIONS` are allowed since the API is read-only. Origins that are not
/// valid header values are skipped with a warning.
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
