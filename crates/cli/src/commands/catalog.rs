//! Catalog and home page commands.

use std::sync::Arc;

use freshcart_storefront::sections::HomePage;
use freshcart_storefront::{FileStore, ProductCatalogCache, Result, StorefrontConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::emit;

type Catalog = ProductCatalogCache<Arc<FileStore>>;

/// Build the catalog over the shared storage file.
pub fn open(config: &StorefrontConfig, storage: Arc<FileStore>) -> Result<Catalog> {
    Ok(ProductCatalogCache::new(&config.catalog, storage)?)
}

/// Print every product.
pub async fn products(catalog: &Catalog) -> Result<()> {
    emit(&catalog.get_products().await)
}

/// Print category names.
pub async fn categories(catalog: &Catalog) -> Result<()> {
    emit(&catalog.get_categories().await)
}

/// Print the products in `name`.
pub async fn category(catalog: &Catalog, name: &str) -> Result<()> {
    emit(&catalog.get_products_by_category(name).await)
}

/// Print home page section data.
pub async fn home(catalog: &Catalog, slides: usize) -> Result<()> {
    let mut rng = StdRng::from_os_rng();
    let page = HomePage::assemble(catalog, slides, &mut rng).await;
    emit(&page)
}
