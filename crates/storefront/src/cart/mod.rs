//! Cart and wishlist state.
//!
//! [`CartStore`] is the only writer of the `cart` and `wishlist` storage
//! keys. Every cart mutation persists first, then publishes:
//!
//! - the new total quantity on a `watch` channel, for badge displays that
//!   only care about the latest value ([`CartStore::subscribe_count`])
//! - a [`CartEvent`] on a `broadcast` channel, for views that re-render the
//!   cart contents ([`CartStore::subscribe`])
//!
//! Wishlist changes are persisted but not published.
//!
//! # Example
//!
//! ```rust
//! use freshcart_core::ProductId;
//! use freshcart_storefront::cart::CartStore;
//! use freshcart_storefront::storage::MemoryStore;
//!
//! let mut store = CartStore::new(MemoryStore::new());
//! let badge = store.subscribe_count();
//!
//! store.add_to_cart(ProductId::new(2), 2);
//! store.add_to_cart(ProductId::new(2), 3);
//!
//! assert_eq!(store.quantity(ProductId::new(2)), 5);
//! assert_eq!(*badge.borrow(), 5);
//! ```

mod events;

use std::collections::{BTreeMap, BTreeSet};

use freshcart_core::ProductId;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error};

use crate::storage::{JsonStoreExt, KeyValueStore, keys};

pub use events::{CartChange, CartEvent};

/// Buffered cart events per subscriber before the slowest one starts lagging.
const EVENT_CAPACITY: usize = 64;

/// Persisted cart lines and wishlist membership.
pub struct CartStore<S> {
    storage: S,
    cart: BTreeMap<ProductId, u32>,
    wishlist: BTreeSet<ProductId>,
    count_tx: watch::Sender<u64>,
    events_tx: broadcast::Sender<CartEvent>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Load the cart and wishlist from `storage`.
    ///
    /// Missing or unparseable stored values start out empty. Lines stored with
    /// a zero quantity and wishlist entries stored as `false` are dropped.
    pub fn new(storage: S) -> Self {
        let mut cart: BTreeMap<ProductId, u32> =
            storage.load_json(keys::CART).unwrap_or_default();
        cart.retain(|_, quantity| *quantity > 0);

        let wishlist = storage
            .load_json::<BTreeMap<ProductId, bool>>(keys::WISHLIST)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(product_id, present)| present.then_some(product_id))
            .collect();

        let (count_tx, _) = watch::channel(sum_quantities(&cart));
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        debug!(
            lines = cart.len(),
            total = *count_tx.borrow(),
            "Cart loaded"
        );

        Self {
            storage,
            cart,
            wishlist,
            count_tx,
            events_tx,
        }
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Add `quantity` to the line for `product_id`, creating it if absent.
    ///
    /// Returns the line's new quantity. `quantity` is not validated: a
    /// negative value shrinks the line, and a line that drops to zero or
    /// below is removed (returning 0).
    pub fn add_to_cart(&mut self, product_id: ProductId, quantity: i32) -> u32 {
        let next = i64::from(self.quantity(product_id)) + i64::from(quantity);

        let change = if next <= 0 {
            self.cart.remove(&product_id);
            CartChange::Removed { product_id }
        } else {
            let quantity = u32::try_from(next).unwrap_or(u32::MAX);
            self.cart.insert(product_id, quantity);
            CartChange::Added {
                product_id,
                quantity,
            }
        };

        self.commit(change);
        self.quantity(product_id)
    }

    /// Remove the line for `product_id`. Removing an absent line is a no-op
    /// apart from the usual persist-and-publish.
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        self.cart.remove(&product_id);
        self.commit(CartChange::Removed { product_id });
    }

    /// Set the line for `product_id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i32) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = quantity.unsigned_abs();
        self.cart.insert(product_id, quantity);
        self.commit(CartChange::Updated {
            product_id,
            quantity,
        });
    }

    /// Remove every line. The wishlist is left alone.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.commit(CartChange::Cleared);
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Flip wishlist membership for `product_id` and return the new state.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> bool {
        if !self.wishlist.remove(&product_id) {
            self.wishlist.insert(product_id);
        }

        let stored: BTreeMap<ProductId, bool> =
            self.wishlist.iter().map(|id| (*id, true)).collect();
        if let Err(e) = self.storage.save_json(keys::WISHLIST, &stored) {
            error!(error = %e, "Failed to persist wishlist");
        }

        self.is_in_wishlist(product_id)
    }

    /// Whether `product_id` is on the wishlist.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.wishlist.contains(&product_id)
    }

    /// Wishlisted product IDs in ascending order.
    pub fn wishlist(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.wishlist.iter().copied()
    }

    // =========================================================================
    // Queries & Subscriptions
    // =========================================================================

    /// Quantity of `product_id` in the cart (0 when absent).
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.cart.get(&product_id).copied().unwrap_or(0)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        sum_quantities(&self.cart)
    }

    /// Cart lines as `(product, quantity)` in ascending product order.
    pub fn lines(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.cart.iter().map(|(id, quantity)| (*id, *quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Watch the total quantity. The receiver always holds the latest value.
    #[must_use]
    pub fn subscribe_count(&self) -> watch::Receiver<u64> {
        self.count_tx.subscribe()
    }

    /// Receive a [`CartEvent`] for every cart mutation made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events_tx.subscribe()
    }

    fn commit(&self, change: CartChange) {
        if let Err(e) = self.storage.save_json(keys::CART, &self.cart) {
            error!(error = %e, "Failed to persist cart");
        }

        let total_quantity = self.total_quantity();
        self.count_tx.send_replace(total_quantity);

        // No subscribers is fine
        let _ = self.events_tx.send(CartEvent {
            change,
            total_quantity,
        });

        debug!(?change, total_quantity, "Cart updated");
    }
}

fn sum_quantities(cart: &BTreeMap<ProductId, u32>) -> u64 {
    cart.values().map(|quantity| u64::from(*quantity)).sum()
}
