//! ShopNow Core - Shared domain types.
//!
//! This crate provides the types shared by the storefront and its tests:
//! products as they come from the catalog, cart line items as they are
//! persisted in visitor storage, and order payloads as they go to the API.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. The JSON shape of every type here is part of an external
//! contract (the REST API or the stored `cart` value), so serde attributes
//! are load-bearing.
//!
//! # Modules
//!
//! - [`types`] - Product, price, cart and order types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
