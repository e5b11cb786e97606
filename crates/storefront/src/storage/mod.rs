//! Durable key-value storage for cart state and catalog snapshots.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is a string-keyed store holding JSON text values
//! - [`MemoryStore`] keeps everything in process (tests, throwaway sessions)
//! - [`FileStore`] persists to a single JSON document so state survives restarts
//! - [`JsonStoreExt`] layers typed load/save on top of any store
//!
//! Both the cart store and the catalog cache take a store by value; wrap a
//! backend in `Arc` to share one between them.
//!
//! # Keys
//!
//! See [`keys`] for the fixed keys written by this crate.

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Standard storage keys used across the storefront.
pub mod keys {
    /// Cart lines: product ID to quantity.
    pub const CART: &str = "cart";
    /// Wishlist membership: product ID to `true`.
    pub const WISHLIST: &str = "wishlist";
    /// Full product list snapshot.
    pub const CACHED_PRODUCTS: &str = "cachedProducts";
    /// Category name list snapshot.
    pub const CACHED_CATEGORIES: &str = "cachedCategories";

    /// Per-category product snapshot key (`category_<name>`).
    #[must_use]
    pub fn category(name: &str) -> String {
        format!("category_{name}")
    }
}

/// Errors that can occur when reading or writing a store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// A string-keyed store of text values.
///
/// Mirrors the browser `localStorage` contract: values are opaque strings and
/// a missing key is `Ok(None)`, not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Typed JSON access for any [`KeyValueStore`].
pub trait JsonStoreExt: KeyValueStore {
    /// Load and decode the value under `key`.
    ///
    /// Fails soft: a missing key, an unreadable backend and an undecodable
    /// value all yield `None`. The latter two are logged.
    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring unparseable stored value");
                None
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the backend cannot be written.
    fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> JsonStoreExt for S {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_category_key() {
        assert_eq!(keys::category("dairy"), "category_dairy");
        assert_eq!(keys::category("men's clothing"), "category_men's clothing");
    }

    #[test]
    fn test_load_json_missing_key() {
        let store = MemoryStore::new();
        assert!(store.load_json::<Vec<String>>("nothing").is_none());
    }

    #[test]
    fn test_load_json_unparseable_value() {
        let store = MemoryStore::new();
        store.set_item(keys::CART, "{not json").unwrap();
        assert!(store.load_json::<BTreeMap<String, u32>>(keys::CART).is_none());
    }

    #[test]
    fn test_load_json_wrong_shape() {
        let store = MemoryStore::new();
        store.set_item(keys::CACHED_CATEGORIES, r#"{"a":1}"#).unwrap();
        assert!(
            store
                .load_json::<Vec<String>>(keys::CACHED_CATEGORIES)
                .is_none()
        );
    }

    #[test]
    fn test_save_then_load_json() {
        let store = MemoryStore::new();
        let categories = vec!["dairy".to_string(), "bakery".to_string()];
        store
            .save_json(keys::CACHED_CATEGORIES, &categories)
            .unwrap();

        assert_eq!(
            store.get_item(keys::CACHED_CATEGORIES).unwrap().as_deref(),
            Some(r#"["dairy","bakery"]"#)
        );
        assert_eq!(
            store.load_json::<Vec<String>>(keys::CACHED_CATEGORIES),
            Some(categories)
        );
    }

    #[test]
    fn test_shared_store_through_arc() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);

        store.set_item("k", "v").unwrap();
        assert_eq!(other.get_item("k").unwrap().as_deref(), Some("v"));

        other.remove_item("k").unwrap();
        assert!(store.get_item("k").unwrap().is_none());
    }
}
