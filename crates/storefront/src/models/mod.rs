//! Storefront-side models that are not part of the shared core types.

pub mod auth;

pub use auth::{AuthToken, Credentials};
