//! Cart and wishlist commands.
//!
//! Each command loads the cart store from storage, applies one change and
//! prints the resulting state.

use std::sync::Arc;

use freshcart_core::ProductId;
use freshcart_storefront::{CartStore, FileStore, Result};
use serde::Serialize;

use super::emit;

/// Cart contents as printed by every cart command.
#[derive(Debug, Serialize)]
struct CartSummary {
    lines: Vec<LineView>,
    total_quantity: u64,
}

#[derive(Debug, Serialize)]
struct LineView {
    product_id: ProductId,
    quantity: u32,
}

#[derive(Debug, Serialize)]
struct WishlistEntryView {
    product_id: ProductId,
    in_wishlist: bool,
}

fn summary(store: &CartStore<Arc<FileStore>>) -> CartSummary {
    CartSummary {
        lines: store
            .lines()
            .map(|(product_id, quantity)| LineView {
                product_id,
                quantity,
            })
            .collect(),
        total_quantity: store.total_quantity(),
    }
}

/// Print the cart.
pub fn show(storage: Arc<FileStore>) -> Result<()> {
    let store = CartStore::new(storage);
    emit(&summary(&store))
}

/// Add `quantity` of `product_id` and print the cart.
pub fn add(storage: Arc<FileStore>, product_id: ProductId, quantity: i32) -> Result<()> {
    let mut store = CartStore::new(storage);
    let line_quantity = store.add_to_cart(product_id, quantity);
    tracing::info!(%product_id, quantity = line_quantity, "Added to cart");
    emit(&summary(&store))
}

/// Remove `product_id` and print the cart.
pub fn remove(storage: Arc<FileStore>, product_id: ProductId) -> Result<()> {
    let mut store = CartStore::new(storage);
    store.remove_from_cart(product_id);
    emit(&summary(&store))
}

/// Set `product_id` to exactly `quantity` and print the cart.
pub fn set(storage: Arc<FileStore>, product_id: ProductId, quantity: i32) -> Result<()> {
    let mut store = CartStore::new(storage);
    store.update_quantity(product_id, quantity);
    emit(&summary(&store))
}

/// Empty the cart and print it.
pub fn clear(storage: Arc<FileStore>) -> Result<()> {
    let mut store = CartStore::new(storage);
    store.clear_cart();
    emit(&summary(&store))
}

/// Print wishlisted product IDs.
pub fn show_wishlist(storage: Arc<FileStore>) -> Result<()> {
    let store = CartStore::new(storage);
    emit(&store.wishlist().collect::<Vec<_>>())
}

/// Toggle `product_id` on the wishlist and print its new membership.
pub fn toggle_wishlist(storage: Arc<FileStore>, product_id: ProductId) -> Result<()> {
    let mut store = CartStore::new(storage);
    let in_wishlist = store.toggle_wishlist(product_id);
    emit(&WishlistEntryView {
        product_id,
        in_wishlist,
    })
}
