//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog API reports prices as bare JSON numbers in the store currency
//! (`"price": 109.95`). `Price` keeps that wire shape while doing arithmetic
//! on a `Decimal` so totals never pick up float rounding noise.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Create a price from an integer amount of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(10995).to_string(), "$109.95");
        assert_eq!(Price::from_cents(300).to_string(), "$3.00");
    }

    #[test]
    fn test_price_reads_json_number() {
        let price: Price = serde_json::from_str("22.3").unwrap();
        assert_eq!(price, Price::from_cents(2230));
    }

    #[test]
    fn test_price_writes_json_number() {
        let json = serde_json::to_string(&Price::from_cents(499)).unwrap();
        assert_eq!(json, "4.99");
    }
}
