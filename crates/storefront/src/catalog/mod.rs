//! Product catalog with persistent caching and multi-strategy retrieval.
//!
//! # Resolution Order
//!
//! Every accessor on [`ProductCatalogCache`] resolves the same way:
//!
//! 1. Return the persisted snapshot for the resource if one exists
//! 2. Otherwise try each [`RetrievalMethod`] in order; the first usable
//!    response is persisted (overwriting the snapshot) and returned
//! 3. If every method fails, return the persisted snapshot if one appeared
//!    meanwhile, else the built-in [`fallback`] data
//!
//! Snapshots never expire. Accessors never fail: callers cannot tell fresh,
//! cached and built-in data apart.
//!
//! # Example
//!
//! ```rust,ignore
//! use freshcart_storefront::catalog::ProductCatalogCache;
//! use freshcart_storefront::storage::FileStore;
//!
//! let catalog = ProductCatalogCache::new(&config.catalog, FileStore::open(&config.storage_path)?)?;
//!
//! let products = catalog.get_products().await;
//! let dairy = catalog.get_products_by_category("dairy").await;
//! ```

pub mod fallback;
mod retrieval;

use freshcart_core::Product;
use reqwest::header::ACCEPT;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::storage::{JsonStoreExt, KeyValueStore};

pub use retrieval::{Resource, RetrievalMethod, default_methods};

/// Errors from a single retrieval attempt or a whole retrieval.
///
/// These never escape the public accessors; they are logged and answered
/// with cached or built-in data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status code.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource URL could not be built.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// Category name would not stay inside the category endpoint.
    #[error("Invalid category name {0:?}")]
    InvalidCategory(String),

    /// Every retrieval method failed.
    #[error("All {attempts} retrieval methods failed for {url}")]
    Exhausted { url: String, attempts: usize },
}

/// Cached, failure-tolerant access to the product catalog.
///
/// Snapshot reads and writes go through the synchronous [`KeyValueStore`]
/// on the calling task. With [`FileStore`](crate::storage::FileStore) a
/// cache miss therefore ends in a blocking file write inside the accessor
/// future; a multi-threaded server should hand the catalog a store that
/// does not block, or call it from `spawn_blocking`.
pub struct ProductCatalogCache<S> {
    client: reqwest::Client,
    base_url: Url,
    methods: Vec<RetrievalMethod>,
    storage: S,
}

impl<S: KeyValueStore> ProductCatalogCache<S> {
    /// Create a catalog from configuration.
    ///
    /// Retrieval goes direct first, then through each configured relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &CatalogConfig, storage: S) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            default_methods(config.relay_prefixes.iter().cloned()),
            storage,
        ))
    }

    /// Create a catalog with an explicit client and method list.
    ///
    /// `base_url` is treated as a directory: a missing trailing slash is added
    /// so resource paths append rather than replace its last segment.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        mut base_url: Url,
        methods: Vec<RetrievalMethod>,
        storage: S,
    ) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            client,
            base_url,
            methods,
            storage,
        }
    }

    /// Retrieval methods in the order they are tried.
    #[must_use]
    pub fn methods(&self) -> &[RetrievalMethod] {
        &self.methods
    }

    // =========================================================================
    // Catalog Accessors
    // =========================================================================

    /// Every product.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Vec<Product> {
        self.resolve(Resource::Products, fallback::products).await
    }

    /// Distinct category names.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Vec<String> {
        self.resolve(Resource::Categories, fallback::categories)
            .await
    }

    /// Products whose category equals `category`.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn get_products_by_category(&self, category: &str) -> Vec<Product> {
        self.resolve(Resource::Category(category), || {
            fallback::products_in(category)
        })
        .await
    }

    // =========================================================================
    // Retrieval
    // =========================================================================

    /// Fetch `resource` from the network, ignoring the cache.
    ///
    /// Methods are tried one at a time in order; each is attempted once.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Exhausted`] if no method produced a
    /// success-status, parseable response.
    pub async fn retrieve<T: DeserializeOwned>(
        &self,
        resource: Resource<'_>,
    ) -> Result<T, CatalogError> {
        let target = resource.url(&self.base_url)?;

        for method in &self.methods {
            match self.fetch_via(method, &target).await {
                Ok(value) => {
                    debug!(method = method.label(), url = %target, "Retrieved catalog data");
                    return Ok(value);
                }
                Err(e) => {
                    warn!(
                        method = method.label(),
                        url = %target,
                        error = %e,
                        "Retrieval method failed"
                    );
                }
            }
        }

        Err(CatalogError::Exhausted {
            url: target.to_string(),
            attempts: self.methods.len(),
        })
    }

    async fn fetch_via<T: DeserializeOwned>(
        &self,
        method: &RetrievalMethod,
        target: &Url,
    ) -> Result<T, CatalogError> {
        let url = method.request_url(target);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(
                body = %body.chars().take(200).collect::<String>(),
                "Unparseable catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    async fn resolve<T, F>(&self, resource: Resource<'_>, fallback: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let key = resource.cache_key();

        if let Some(cached) = self.storage.load_json::<T>(&key) {
            debug!(key, "Cache hit");
            return cached;
        }

        match self.retrieve::<T>(resource).await {
            Ok(fresh) => {
                if let Err(e) = self.storage.save_json(&key, &fresh) {
                    warn!(key, error = %e, "Failed to cache catalog data");
                }
                fresh
            }
            Err(e) => {
                warn!(key, error = %e, "Catalog unavailable, serving fallback data");
                self.storage.load_json(&key).unwrap_or_else(|| {
                    info!(key, "No cached snapshot, using built-in catalog");
                    fallback()
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use freshcart_core::{Price, ProductId, Rating};

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::storage::{MemoryStore, keys};

    /// A catalog with no retrieval methods: every network attempt fails
    /// without touching the network.
    fn offline(storage: Arc<MemoryStore>) -> ProductCatalogCache<Arc<MemoryStore>> {
        ProductCatalogCache::with_client(
            reqwest::Client::new(),
            Url::parse("https://fakestoreapi.com").unwrap(),
            Vec::new(),
            storage,
        )
    }

    fn cached_product() -> Product {
        Product {
            id: ProductId::new(20),
            title: "DANVOUY Womens T Shirt Casual Cotton Short".to_string(),
            price: Price::from_cents(1299),
            description: "95% Cotton, 5% Spandex".to_string(),
            category: "women's clothing".to_string(),
            image: "https://fakestoreapi.com/img/61pHAEJ4NML._AC_UX679_.jpg".to_string(),
            rating: Rating {
                rate: 3.6,
                count: 145,
            },
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let catalog = ProductCatalogCache::with_client(
            reqwest::Client::new(),
            Url::parse("https://shop.example/api").unwrap(),
            Vec::new(),
            MemoryStore::new(),
        );
        assert_eq!(catalog.base_url.as_str(), "https://shop.example/api/");
    }

    #[test]
    fn test_new_orders_direct_before_relays() {
        let config = CatalogConfig {
            relay_prefixes: vec!["https://relay.example/?url=".to_string()],
            ..StorefrontConfig::from_lookup(|_| None).unwrap().catalog
        };
        let catalog = ProductCatalogCache::new(&config, MemoryStore::new()).unwrap();

        assert_eq!(catalog.methods().len(), 2);
        assert_eq!(catalog.methods()[0], RetrievalMethod::Direct);
        assert!(matches!(catalog.methods()[1], RetrievalMethod::Relay { .. }));
    }

    #[tokio::test]
    async fn test_no_cache_no_network_serves_builtin_products() {
        let catalog = offline(Arc::new(MemoryStore::new()));

        let products = catalog.get_products().await;
        assert_eq!(products, fallback::products());
        assert_eq!(products.len(), 5);
    }

    #[tokio::test]
    async fn test_builtin_data_is_not_cached() {
        let storage = Arc::new(MemoryStore::new());
        let catalog = offline(Arc::clone(&storage));

        catalog.get_products().await;
        catalog.get_categories().await;
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_builtin_categories_and_dairy() {
        let catalog = offline(Arc::new(MemoryStore::new()));

        assert_eq!(
            catalog.get_categories().await,
            vec!["fruits", "dairy", "bakery", "vegetables"]
        );

        let dairy: Vec<String> = catalog
            .get_products_by_category("dairy")
            .await
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(dairy, vec!["Organic Milk", "Free Range Eggs"]);
    }

    #[tokio::test]
    async fn test_cached_snapshot_wins_over_builtin() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .save_json(keys::CACHED_PRODUCTS, &vec![cached_product()])
            .unwrap();
        let catalog = offline(storage);

        assert_eq!(catalog.get_products().await, vec![cached_product()]);
    }

    #[tokio::test]
    async fn test_category_snapshot_is_per_category() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .save_json(&keys::category("women's clothing"), &vec![cached_product()])
            .unwrap();
        let catalog = offline(storage);

        assert_eq!(
            catalog.get_products_by_category("women's clothing").await,
            vec![cached_product()]
        );
        assert!(catalog.get_products_by_category("jewelery").await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_through() {
        let storage = Arc::new(MemoryStore::with_items([(
            keys::CACHED_CATEGORIES,
            "[oops",
        )]));
        let catalog = offline(storage);

        assert_eq!(catalog.get_categories().await, fallback::categories());
    }

    #[tokio::test]
    async fn test_dot_segment_category_serves_builtin_and_caches_nothing() {
        let storage = Arc::new(MemoryStore::new());
        let catalog = offline(Arc::clone(&storage));

        assert!(catalog.get_products_by_category("..").await.is_empty());
        assert!(catalog.get_products_by_category(".").await.is_empty());
        assert!(storage.is_empty());

        let err = catalog
            .retrieve::<Vec<Product>>(Resource::Category(".."))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCategory(_)));
    }

    #[tokio::test]
    async fn test_retrieve_without_methods_is_exhausted() {
        let catalog = offline(Arc::new(MemoryStore::new()));

        let err = catalog
            .retrieve::<Vec<Product>>(Resource::Products)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Exhausted { attempts: 0, .. }));
        assert_eq!(
            err.to_string(),
            "All 0 retrieval methods failed for https://fakestoreapi.com/products"
        );
    }
}
