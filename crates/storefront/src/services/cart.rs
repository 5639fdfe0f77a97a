//! Cart service.
//!
//! The cart lives in visitor storage under [`keys::CART`] as a JSON array of
//! line items. Every mutation is read-modify-write of the whole array.
//!
//! A missing key and a stored JSON `null` both read as an empty cart. Any
//! other undecodable value is reported as [`CartError::Decode`]; it is not
//! repaired or discarded.

use shopnow_core::{LineItem, OrderRequest, Product};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::api::{ApiError, StoreApi};
use crate::services::auth::load_token;
use crate::storage::{Storage, StorageError, keys};

/// Errors that can occur while reading or writing the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored cart is not a JSON array of line items.
    #[error("stored cart is malformed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("failed to encode cart: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result of a checkout attempt.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// The backend does not take orders; the cart was cleared.
    Acknowledged,
    /// The order was accepted and the cart cleared.
    OrderPlaced(serde_json::Value),
    /// No token is stored. Nothing was submitted.
    LoginRequired,
    /// The cart is empty. Nothing was submitted.
    EmptyCart,
    /// The backend rejected the order or could not be reached. The cart is kept.
    Failed(ApiError),
}

/// Read the stored cart.
///
/// # Errors
///
/// Returns `CartError::Decode` if the stored value is not a JSON array of
/// line items, or `CartError::Storage` if storage fails.
pub async fn load<S: Storage>(storage: &S) -> Result<Vec<LineItem>, CartError> {
    match storage.get(keys::CART).await? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str::<Option<Vec<LineItem>>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(CartError::Decode),
    }
}

/// Overwrite the stored cart.
///
/// # Errors
///
/// Returns `CartError` if encoding or storage fails.
pub async fn save<S: Storage>(storage: &S, items: &[LineItem]) -> Result<(), CartError> {
    let raw = serde_json::to_string(items).map_err(CartError::Encode)?;
    storage.set(keys::CART, raw).await?;
    Ok(())
}

/// Append one unit of `product` to the cart and return the new line count.
///
/// Re-adding a product already in the cart appends another line.
///
/// # Errors
///
/// Returns `CartError::Decode` if the stored cart is malformed; storage is
/// left untouched in that case.
#[instrument(skip(storage, product), fields(product_id = %product.id))]
pub async fn add<S: Storage>(storage: &S, product: Product) -> Result<usize, CartError> {
    let mut items = load(storage).await?;
    items.push(LineItem::single(product));
    save(storage, &items).await?;
    debug!(lines = items.len(), "added to cart");
    Ok(items.len())
}

/// Remove the stored cart entirely.
///
/// # Errors
///
/// Returns `CartError::Storage` if storage fails.
pub async fn clear<S: Storage>(storage: &S) -> Result<(), CartError> {
    storage.remove(keys::CART).await?;
    Ok(())
}

/// Check out the stored cart.
///
/// When the backend does not submit orders the cart is cleared
/// unconditionally. Otherwise a stored token is required, an empty cart is
/// not submitted, and the cart is cleared only after the backend accepts the
/// order.
///
/// # Errors
///
/// Returns `CartError` for storage failures or a malformed stored cart.
/// Backend failures are not errors here; they are reported as
/// [`CheckoutOutcome::Failed`].
#[instrument(skip_all)]
pub async fn checkout<A, S>(api: &A, storage: &S) -> Result<CheckoutOutcome, CartError>
where
    A: StoreApi,
    S: Storage,
{
    if !api.submits_orders() {
        clear(storage).await?;
        return Ok(CheckoutOutcome::Acknowledged);
    }

    let Some(token) = load_token(storage).await? else {
        debug!("checkout without token");
        return Ok(CheckoutOutcome::LoginRequired);
    };

    let items = load(storage).await?;
    if items.is_empty() {
        return Ok(CheckoutOutcome::EmptyCart);
    }

    let order = OrderRequest::from(items.as_slice());
    match api.place_order(&token, &order).await {
        Ok(confirmation) => {
            clear(storage).await?;
            debug!(?confirmation, "order placed");
            Ok(CheckoutOutcome::OrderPlaced(confirmation))
        }
        Err(e) => {
            warn!(error = %e, "order submission failed");
            Ok(CheckoutOutcome::Failed(e))
        }
    }
}
