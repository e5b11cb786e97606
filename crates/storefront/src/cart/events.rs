//! Change notifications published by the cart store.

use freshcart_core::ProductId;
use serde::Serialize;

/// What a cart mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartChange {
    /// Quantity was added to a line (possibly creating it).
    Added {
        product_id: ProductId,
        /// Line quantity after the change.
        quantity: u32,
    },
    /// A line was set to an exact quantity.
    Updated { product_id: ProductId, quantity: u32 },
    /// A line was removed, or never existed.
    Removed { product_id: ProductId },
    /// Every line was removed.
    Cleared,
}

/// Broadcast to cart observers after every mutation has been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartEvent {
    pub change: CartChange,
    /// Sum of all line quantities after the change.
    pub total_quantity: u64,
}
