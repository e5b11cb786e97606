//! Unified error handling.
//!
//! Cart and catalog operations never fail; they recover locally and log.
//! `AppError` covers what can still go wrong around them: loading
//! configuration, opening storage, building the HTTP client and writing
//! command output.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog client could not be built.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Output could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ConfigError::InvalidEnvVar(
            "FRESHCART_REQUEST_TIMEOUT_SECS".to_string(),
            "must be greater than zero".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Config error: Invalid environment variable FRESHCART_REQUEST_TIMEOUT_SECS: must be greater than zero"
        );

        let err = AppError::from(StorageError::Poisoned);
        assert_eq!(err.to_string(), "Storage error: Storage lock poisoned");

        let err = AppError::from(CatalogError::Exhausted {
            url: "https://fakestoreapi.com/products".to_string(),
            attempts: 3,
        });
        assert_eq!(
            err.to_string(),
            "Catalog error: All 3 retrieval methods failed for https://fakestoreapi.com/products"
        );
    }
}
