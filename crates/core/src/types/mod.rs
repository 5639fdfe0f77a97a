//! Core types for ShopNow.
//!
//! This module provides type-safe wrappers for the storefront's domain.

pub mod cart;
pub mod id;
pub mod order;
pub mod price;
pub mod product;

pub use cart::LineItem;
pub use id::ProductId;
pub use order::{OrderItem, OrderRequest};
pub use price::{Price, PriceError};
pub use product::Product;
