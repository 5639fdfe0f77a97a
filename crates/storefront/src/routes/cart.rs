//! Cart route handlers.
//!
//! The cart is read from and written to visitor storage on every request;
//! see [`crate::services::cart`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use shopnow_core::{LineItem, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::api::StoreApi;
use crate::error::{Result, add_breadcrumb};
use crate::flash;
use crate::services::cart::{self as cart_service, CheckoutOutcome};
use crate::state::AppState;
use crate::storage::SessionStorage;

pub const MSG_ADDED: &str = "Added to cart";
pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found";
pub const MSG_MOCK_CHECKOUT: &str = "Mock checkout complete!";
pub const MSG_ORDER_PLACED: &str = "Order placed successfully!";
pub const MSG_CHECKOUT_FAILED: &str = "Checkout failed. Please try again.";
pub const MSG_EMPTY_CART: &str = "Your cart is empty.";
pub const MSG_CLEARED: &str = "Cart cleared";

/// Cart line display data for templates.
#[derive(Clone)]
pub struct LineItemView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name().to_string(),
            quantity: item.quantity,
            price: item.price().to_string(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub items: Vec<LineItemView>,
    pub flash: Option<String>,
}

/// Display cart page.
///
/// # Errors
///
/// Fails if the stored cart is malformed or storage is unavailable.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<impl IntoResponse> {
    let storage = SessionStorage::new(session.clone());
    let items = cart_service::load(&storage).await?;

    Ok(CartShowTemplate {
        items: items.iter().map(LineItemView::from).collect(),
        flash: flash::take(&session).await,
    })
}

/// Add one unit of a product to the cart.
///
/// The product is looked up in the backend's current catalog. An unknown
/// product (or a failed catalog fetch) is acknowledged and leaves the cart
/// as it was.
///
/// # Errors
///
/// Fails if the stored cart is malformed or storage is unavailable.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let wanted = ProductId::new(form.product_id);

    let product = match state.backend().list_products().await {
        Ok(products) => products.into_iter().find(|p| p.id == wanted),
        Err(e) => {
            tracing::warn!("Failed to fetch products for add to cart: {e}");
            None
        }
    };

    let Some(product) = product else {
        flash::set(&session, MSG_PRODUCT_NOT_FOUND).await;
        return Ok(Redirect::to("/"));
    };

    let storage = SessionStorage::new(session.clone());
    cart_service::add(&storage, product).await?;
    add_breadcrumb("cart", "Added to cart");

    flash::set(&session, MSG_ADDED).await;
    Ok(Redirect::to("/"))
}

/// Check out the cart.
///
/// # Errors
///
/// Fails if the stored cart is malformed or storage is unavailable.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let storage = SessionStorage::new(session.clone());
    add_breadcrumb("cart", "Checkout");

    let message = match cart_service::checkout(state.backend(), &storage).await? {
        CheckoutOutcome::LoginRequired => return Ok(Redirect::to("/login")),
        CheckoutOutcome::Acknowledged => MSG_MOCK_CHECKOUT,
        CheckoutOutcome::OrderPlaced(_) => MSG_ORDER_PLACED,
        CheckoutOutcome::EmptyCart => MSG_EMPTY_CART,
        CheckoutOutcome::Failed(_) => MSG_CHECKOUT_FAILED,
    };

    flash::set(&session, message).await;
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
///
/// # Errors
///
/// Fails if storage is unavailable.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    let storage = SessionStorage::new(session.clone());
    cart_service::clear(&storage).await?;

    flash::set(&session, MSG_CLEARED).await;
    Ok(Redirect::to("/cart"))
}
