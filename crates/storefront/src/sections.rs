//! Home page section data.
//!
//! Decides which catalog data lands in which section of the home page: the
//! main banner slides, the category blocks, the promotional banners and the
//! special offer. Rendering is left to the caller; these are plain view
//! models.

use freshcart_core::{Price, Product, ProductId};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::catalog::ProductCatalogCache;
use crate::storage::KeyValueStore;

/// Number of category blocks on the home page.
pub const CATEGORY_BLOCK_LIMIT: usize = 4;

/// Discount labels for the promotional banners, one banner per label.
pub const PROMOTION_DISCOUNTS: [&str; 2] = ["20% off", "15% off"];

/// One slide of the main banner carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerSlide {
    pub product_id: ProductId,
    pub title: String,
    pub description: String,
    pub image: String,
}

/// A category tile showing how many products it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBlock {
    pub category: String,
    /// Display title, e.g. `MENS CLOTHING` for `men's clothing`.
    pub title: String,
    /// Count label, e.g. `4 Products`.
    pub label: String,
    pub product_count: usize,
    pub background_image: String,
}

/// A discounted category banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoBanner {
    pub category: String,
    /// Display title, e.g. `Jewelery` for `jewelery`.
    pub title: String,
    pub discount: String,
    pub background_image: String,
}

/// A single featured product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialOffer {
    pub product_id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub background_image: String,
}

/// Every data-driven section of the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomePage {
    pub main_banner: Vec<BannerSlide>,
    pub category_blocks: Vec<CategoryBlock>,
    pub promotions: Vec<PromoBanner>,
    pub special_offer: Option<SpecialOffer>,
}

impl HomePage {
    /// Assemble all sections from `catalog`.
    ///
    /// `slides` is the number of main banner slots to fill.
    pub async fn assemble<S, R>(catalog: &ProductCatalogCache<S>, slides: usize, rng: &mut R) -> Self
    where
        S: KeyValueStore,
        R: Rng + ?Sized,
    {
        let products = catalog.get_products().await;
        let categories = catalog.get_categories().await;

        Self {
            main_banner: main_banner(&products, slides),
            category_blocks: category_blocks(catalog, &categories).await,
            promotions: promotional_banners(catalog, &categories).await,
            special_offer: special_offer(&products, rng),
        }
    }
}

/// The first `slides` products as banner slides.
#[must_use]
pub fn main_banner(products: &[Product], slides: usize) -> Vec<BannerSlide> {
    products
        .iter()
        .take(slides)
        .map(|product| BannerSlide {
            product_id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
        })
        .collect()
}

/// Blocks for the first [`CATEGORY_BLOCK_LIMIT`] categories.
///
/// Categories with no products are skipped.
pub async fn category_blocks<S: KeyValueStore>(
    catalog: &ProductCatalogCache<S>,
    categories: &[String],
) -> Vec<CategoryBlock> {
    let mut blocks = Vec::new();

    for category in categories.iter().take(CATEGORY_BLOCK_LIMIT) {
        let products = catalog.get_products_by_category(category).await;
        let Some(first) = products.first() else {
            continue;
        };

        blocks.push(CategoryBlock {
            category: category.clone(),
            title: block_title(category),
            label: format!("{} Products", products.len()),
            product_count: products.len(),
            background_image: first.image.clone(),
        });
    }

    blocks
}

/// One banner per [`PROMOTION_DISCOUNTS`] entry, paired with the categories
/// in order.
///
/// Categories with no products are skipped; their discount goes unused.
pub async fn promotional_banners<S: KeyValueStore>(
    catalog: &ProductCatalogCache<S>,
    categories: &[String],
) -> Vec<PromoBanner> {
    let mut banners = Vec::new();

    for (category, discount) in categories.iter().zip(PROMOTION_DISCOUNTS) {
        let products = catalog.get_products_by_category(category).await;
        let Some(first) = products.first() else {
            continue;
        };

        banners.push(PromoBanner {
            category: category.clone(),
            title: promo_title(category),
            discount: discount.to_string(),
            background_image: first.image.clone(),
        });
    }

    banners
}

/// A uniformly random product, or `None` for an empty catalog.
pub fn special_offer<R: Rng + ?Sized>(products: &[Product], rng: &mut R) -> Option<SpecialOffer> {
    products.choose(rng).map(|product| SpecialOffer {
        product_id: product.id,
        title: product.title.clone(),
        description: product.description.clone(),
        price: product.price,
        background_image: product.image.clone(),
    })
}

/// Upper-cased category name with its first apostrophe dropped.
fn block_title(category: &str) -> String {
    category.replacen('\'', "", 1).to_uppercase()
}

/// Category name with its first letter capitalized.
fn promo_title(category: &str) -> String {
    let mut chars = category.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use url::Url;

    use super::*;
    use crate::catalog::fallback;
    use crate::storage::MemoryStore;

    fn offline_catalog() -> ProductCatalogCache<MemoryStore> {
        ProductCatalogCache::with_client(
            reqwest::Client::new(),
            Url::parse("https://fakestoreapi.com/").unwrap(),
            Vec::new(),
            MemoryStore::new(),
        )
    }

    #[test]
    fn test_block_title() {
        assert_eq!(block_title("men's clothing"), "MENS CLOTHING");
        assert_eq!(block_title("it's o'clock"), "ITS O'CLOCK");
        assert_eq!(block_title("dairy"), "DAIRY");
    }

    #[test]
    fn test_promo_title() {
        assert_eq!(promo_title("jewelery"), "Jewelery");
        assert_eq!(promo_title("women's clothing"), "Women's clothing");
        assert_eq!(promo_title(""), "");
    }

    #[test]
    fn test_main_banner_takes_leading_products() {
        let products = fallback::products();

        let slides = main_banner(&products, 3);
        let titles: Vec<&str> = slides.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Organic Bananas", "Organic Milk", "Whole Grain Bread"]
        );

        assert_eq!(main_banner(&products, 10).len(), 5);
        assert!(main_banner(&[], 3).is_empty());
    }

    #[test]
    fn test_special_offer_picks_a_catalog_product() {
        let products = fallback::products();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let offer = special_offer(&products, &mut rng);
            let offer = offer.as_ref().map(|o| o.product_id);
            assert!(products.iter().any(|p| Some(p.id) == offer));
        }
    }

    #[test]
    fn test_special_offer_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(special_offer(&[], &mut rng).is_none());
    }

    #[tokio::test]
    async fn test_category_blocks_from_builtin_catalog() {
        let catalog = offline_catalog();
        let categories = catalog.get_categories().await;

        let blocks = category_blocks(&catalog, &categories).await;
        assert_eq!(blocks.len(), 4);

        let dairy = blocks.iter().find(|b| b.category == "dairy").unwrap();
        assert_eq!(dairy.title, "DAIRY");
        assert_eq!(dairy.label, "2 Products");
        assert_eq!(dairy.background_image, "images/product-thumb-2.png");
    }

    #[tokio::test]
    async fn test_category_blocks_limit_and_skip_empty() {
        let catalog = offline_catalog();
        let categories: Vec<String> = ["electronics", "fruits", "dairy", "bakery", "vegetables"]
            .into_iter()
            .map(String::from)
            .collect();

        let blocks = category_blocks(&catalog, &categories).await;
        let names: Vec<&str> = blocks.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["fruits", "dairy", "bakery"]);
    }

    #[tokio::test]
    async fn test_promotional_banners_pair_discounts() {
        let catalog = offline_catalog();
        let categories = catalog.get_categories().await;

        let banners = promotional_banners(&catalog, &categories).await;
        assert_eq!(
            banners,
            vec![
                PromoBanner {
                    category: "fruits".to_string(),
                    title: "Fruits".to_string(),
                    discount: "20% off".to_string(),
                    background_image: "images/product-thumb-1.png".to_string(),
                },
                PromoBanner {
                    category: "dairy".to_string(),
                    title: "Dairy".to_string(),
                    discount: "15% off".to_string(),
                    background_image: "images/product-thumb-2.png".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_assemble_home_page() {
        let catalog = offline_catalog();
        let mut rng = StdRng::seed_from_u64(42);

        let page = HomePage::assemble(&catalog, 2, &mut rng).await;
        assert_eq!(page.main_banner.len(), 2);
        assert_eq!(page.category_blocks.len(), 4);
        assert_eq!(page.promotions.len(), 2);
        assert!(page.special_offer.is_some());
    }
}
