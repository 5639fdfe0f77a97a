//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Product listing (home)
//! GET  /health         - Health check
//!
//! # Cart
//! GET  /cart           - Cart page
//! POST /cart/add       - Add one unit of a product, redirect to /
//! POST /cart/checkout  - Check out, redirect to /cart (or /login)
//! POST /cart/clear     - Empty the cart, redirect to /cart
//!
//! # Auth
//! GET  /login          - Login page
//! POST /login          - Login action, redirect to / on success
//! ```
//!
//! Every POST answers with a 303 redirect and reports its outcome through a
//! flash message shown on the page it redirects to.

pub mod auth;
pub mod cart;
pub mod home;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/checkout", post(cart::checkout))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/health", get(health))
        // Cart routes
        .nest("/cart", cart_routes())
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login))
        .fallback(not_found)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
