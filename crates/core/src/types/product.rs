//! Catalog records as served by the product API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Aggregate customer rating for a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 4.5).
    pub rate: f64,
    /// Total number of ratings.
    pub count: u32,
}

/// A product in the catalog.
///
/// Field names match the API's JSON shape:
/// `{id, title, price, description, category, image, rating: {rate, count}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Rating,
}

impl Product {
    /// Whether this product belongs to `category` (exact match).
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category == category
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserialize_api_shape() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995));
        assert_eq!(product.rating.count, 120);
        assert!(product.in_category("men's clothing"));
        assert!(!product.in_category("electronics"));
    }

    #[test]
    fn test_product_missing_optional_fields() {
        let json = r#"{"id": 2, "title": "Plain", "price": 1, "category": "misc"}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.description.is_empty());
        assert!(product.image.is_empty());
        assert_eq!(product.rating, Rating::default());
    }
}
