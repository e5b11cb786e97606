//! Integration tests for FreshCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p freshcart-integration-tests
//! ```
//!
//! No external services are needed: catalog endpoints and relays are served
//! by a local `wiremock` server, and file-backed storage lives in a temp dir.
//!
//! # Test Categories
//!
//! - `catalog_retrieval` - Method ordering, caching and fallback against a mock API
//! - `cart_persistence` - Cart and wishlist state across store reopens
//! - `home_page` - Home page sections built from a mock API

use std::time::Duration;

use freshcart_storefront::{CatalogConfig, KeyValueStore, ProductCatalogCache};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Path segment the mock relay listens on.
pub const RELAY_PATH: &str = "/relay";

/// Relay prefix pointing at the mock server's relay endpoint.
#[must_use]
pub fn relay_prefix(server: &MockServer) -> String {
    format!("{}{RELAY_PATH}?url=", server.uri())
}

/// Absolute URL of `path` on the mock API, as a relay sees it.
#[must_use]
pub fn api_url(server: &MockServer, path: &str) -> String {
    format!("{}/{path}", server.uri())
}

/// A catalog talking to `server` directly, then through each of `relays`.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
pub fn catalog_for<S: KeyValueStore>(
    server: &MockServer,
    relays: Vec<String>,
    storage: S,
) -> ProductCatalogCache<S> {
    let config = CatalogConfig {
        base_url: server.uri().parse().expect("mock server URI is a URL"),
        relay_prefixes: relays,
        request_timeout: Duration::from_secs(2),
    };
    ProductCatalogCache::new(&config, storage).expect("HTTP client builds")
}

/// A product as the catalog API returns it.
#[must_use]
pub fn product_json(id: i64, title: &str, category: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://img.example/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 120 }
    })
}

/// A small remote catalog spanning two categories.
#[must_use]
pub fn remote_products() -> Value {
    json!([
        product_json(1, "Fjallraven Backpack", "men's clothing", 109.95),
        product_json(2, "Mens Casual Slim Fit", "men's clothing", 15.99),
        product_json(5, "Dragon Station Bracelet", "jewelery", 695.0),
    ])
}
