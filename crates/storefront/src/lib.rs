//! FreshCart Storefront library.
//!
//! Storefront logic for the FreshCart demo shop, independent of any UI:
//!
//! - [`cart`] - Cart and wishlist store with change notifications
//! - [`catalog`] - Product catalog with persistent caching and fallback retrieval
//! - [`sections`] - Home page section data built from the catalog
//! - [`storage`] - Key-value storage backends shared by cart and catalog
//! - [`config`] - Environment-based configuration
//!
//! The cart and the catalog are independent; each is handed its own storage
//! (or a shared `Arc` of one).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod sections;
pub mod storage;

pub use cart::{CartChange, CartEvent, CartStore};
pub use catalog::{CatalogError, ProductCatalogCache, RetrievalMethod};
pub use config::{CatalogConfig, StorefrontConfig};
pub use error::{AppError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
