//! Built-in catalog served when neither the network nor the cache has data.

use freshcart_core::{Price, Product, ProductId, Rating};

/// `(id, title, cents, description, category, image, rate, count)`
type Row = (i64, &'static str, i64, &'static str, &'static str, &'static str, f64, u32);

const ROWS: [Row; 5] = [
    (
        1,
        "Organic Bananas",
        299,
        "Sweet, ripe organic bananas sold by the bunch.",
        "fruits",
        "images/product-thumb-1.png",
        4.5,
        120,
    ),
    (
        2,
        "Organic Milk",
        499,
        "Fresh whole milk from pasture-raised cows.",
        "dairy",
        "images/product-thumb-2.png",
        4.7,
        89,
    ),
    (
        3,
        "Whole Grain Bread",
        349,
        "Freshly baked loaf made with whole grains and seeds.",
        "bakery",
        "images/product-thumb-3.png",
        4.3,
        64,
    ),
    (
        4,
        "Free Range Eggs",
        599,
        "A dozen large brown eggs from free range hens.",
        "dairy",
        "images/product-thumb-4.png",
        4.8,
        152,
    ),
    (
        5,
        "Fresh Spinach",
        249,
        "Crisp baby spinach leaves, washed and ready to eat.",
        "vegetables",
        "images/product-thumb-5.png",
        4.2,
        47,
    ),
];

/// The fixed five-product catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    ROWS.iter()
        .map(
            |&(id, title, cents, description, category, image, rate, count)| Product {
                id: ProductId::new(id),
                title: title.to_string(),
                price: Price::from_cents(cents),
                description: description.to_string(),
                category: category.to_string(),
                image: image.to_string(),
                rating: Rating { rate, count },
            },
        )
        .collect()
}

/// Distinct categories of the built-in catalog, in first-seen order.
#[must_use]
pub fn categories() -> Vec<String> {
    distinct_categories(&products())
}

/// Built-in products in `category`.
#[must_use]
pub fn products_in(category: &str) -> Vec<Product> {
    products()
        .into_iter()
        .filter(|product| product.in_category(category))
        .collect()
}

/// Distinct categories of `products`, in first-seen order.
#[must_use]
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}
