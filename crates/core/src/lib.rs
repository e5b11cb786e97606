//! FreshCart Core - Shared types library.
//!
//! This crate provides the types shared by all FreshCart components:
//! - `storefront` - Cart/wishlist store and product catalog cache
//! - `cli` - Command-line front end for the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe product IDs, prices, and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
