//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FRESHCART_API_BASE_URL` - Catalog API base URL (default: <https://fakestoreapi.com/>)
//! - `FRESHCART_RELAY_PREFIXES` - Comma-separated relay URL prefixes tried after the
//!   direct request, in order. Set to an empty string to disable relays.
//! - `FRESHCART_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `FRESHCART_STORAGE_PATH` - JSON file backing cart and catalog storage
//!   (default: `.freshcart/storage.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com/";
const DEFAULT_RELAY_PREFIXES: &str = "https://api.allorigins.win/raw?url=,https://corsproxy.io/?url=";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_PATH: &str = ".freshcart/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// File backing cart, wishlist and catalog snapshots
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., production)
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL; resource paths are resolved against it
    pub base_url: Url,
    /// Relay prefixes tried after the direct request, in order
    pub relay_prefixes: Vec<String>,
    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let base_url = parse_url(
            "FRESHCART_API_BASE_URL",
            &get_or_default("FRESHCART_API_BASE_URL", DEFAULT_BASE_URL),
        )?;
        let relay_prefixes = parse_relay_prefixes(
            "FRESHCART_RELAY_PREFIXES",
            &get_or_default("FRESHCART_RELAY_PREFIXES", DEFAULT_RELAY_PREFIXES),
        )?;
        let request_timeout = parse_timeout(
            "FRESHCART_REQUEST_TIMEOUT_SECS",
            &get_or_default(
                "FRESHCART_REQUEST_TIMEOUT_SECS",
                &DEFAULT_REQUEST_TIMEOUT_SECS.to_string(),
            ),
        )?;
        let storage_path =
            PathBuf::from(get_or_default("FRESHCART_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            catalog: CatalogConfig {
                base_url,
                relay_prefixes,
                request_timeout,
            },
            storage_path,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an absolute http(s) URL.
fn parse_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Split a comma-separated prefix list, validating each entry.
fn parse_relay_prefixes(var_name: &str, value: &str) -> Result<Vec<String>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .map(|prefix| parse_url(var_name, prefix).map(|_| prefix.to_string()))
        .collect()
}

/// Parse a positive number of seconds.
fn parse_timeout(var_name: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be greater than zero".to_string(),
        ));
    }

    Ok(Duration::from_secs(secs))
}
