//! Business logic services.
//!
//! Services are generic over [`Storage`](crate::storage::Storage) and
//! [`StoreApi`](crate::api::StoreApi) so they run the same against a visitor
//! session, an in-memory map, or a test double.

pub mod auth;
pub mod cart;
