//! Storefront behaviour against the built-in mock backend.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum::routing::post;
use shopnow_integration_tests::{TestApp, mock_state};
use shopnow_storefront::api::{MOCK_EMAIL, MOCK_PASSWORD};
use shopnow_storefront::middleware::create_session_layer;
use shopnow_storefront::storage::{SessionStorage, Storage, keys};
use tower_sessions::Session;

#[tokio::test]
async fn home_lists_mock_catalog() {
    let mut app = TestApp::mock();

    let page = app.get("/").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Welcome to ShopNow"));
    assert_eq!(page.product_cards(), 3);
    assert!(page.body.contains("Mock Product 1"));
    assert!(page.body.contains("$19.99"));
    assert!(page.body.contains("Great value"));
    assert!(page.flash().is_none());
}

#[tokio::test]
async fn health_is_ok_and_tagged_with_request_id() {
    let mut app = TestApp::mock();

    let response = app.get("/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
    assert!(response.request_id.is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let mut app = TestApp::mock();

    let response = app.get("/products/1").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, "Not found: /products/1");
}

#[tokio::test]
async fn cart_starts_empty() {
    let mut app = TestApp::mock();

    let page = app.get("/cart").await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.cart_lines(), 0);
    assert!(page.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn add_to_cart_appends_a_line_per_click() {
    let mut app = TestApp::mock();

    let response = app.add_to_cart("1").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    let home = app.get("/").await;
    assert_eq!(home.flash(), Some("Added to cart"));

    app.add_to_cart("1").await;
    app.add_to_cart("3").await;

    let cart = app.get("/cart").await;
    assert_eq!(cart.cart_lines(), 3);
    assert_eq!(cart.body.matches("Mock Product 1 x 1 - $19.99").count(), 2);
    assert!(cart.body.contains("Mock Product 3 x 1 - $9.99"));
}

#[tokio::test]
async fn flash_is_shown_once() {
    let mut app = TestApp::mock();

    app.add_to_cart("2").await;

    assert_eq!(app.get("/").await.flash(), Some("Added to cart"));
    assert!(app.get("/").await.flash().is_none());
}

#[tokio::test]
async fn unknown_product_leaves_cart_unchanged() {
    let mut app = TestApp::mock();
    app.add_to_cart("2").await;

    let response = app.add_to_cart("does-not-exist").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    assert_eq!(app.get("/").await.flash(), Some("Product not found"));
    assert_eq!(app.get("/cart").await.cart_lines(), 1);
}

#[tokio::test]
async fn mock_checkout_clears_cart_without_login() {
    let mut app = TestApp::mock();
    app.add_to_cart("1").await;
    app.add_to_cart("2").await;

    let response = app.post_form("/cart/checkout", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/cart"));

    let cart = app.get("/cart").await;
    assert_eq!(cart.flash(), Some("Mock checkout complete!"));
    assert_eq!(cart.cart_lines(), 0);
}

#[tokio::test]
async fn mock_checkout_of_empty_cart_is_acknowledged() {
    let mut app = TestApp::mock();

    app.post_form("/cart/checkout", &[]).await;

    let cart = app.get("/cart").await;
    assert_eq!(cart.flash(), Some("Mock checkout complete!"));
    assert_eq!(cart.cart_lines(), 0);
}

#[tokio::test]
async fn clear_empties_cart() {
    let mut app = TestApp::mock();
    app.add_to_cart("1").await;
    app.add_to_cart("3").await;

    let response = app.post_form("/cart/clear", &[]).await;
    assert_eq!(response.location.as_deref(), Some("/cart"));

    let cart = app.get("/cart").await;
    assert_eq!(cart.flash(), Some("Cart cleared"));
    assert_eq!(cart.cart_lines(), 0);
}

#[tokio::test]
async fn login_with_mock_credentials_redirects_home() {
    let mut app = TestApp::mock();

    let response = app.login(MOCK_EMAIL, MOCK_PASSWORD).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.location.is_none());
    assert_eq!(home.product_cards(), 3);

    let page = app.get("/login").await;
    assert!(page.body.contains("You are signed in."));
    assert!(page.flash().is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let mut app = TestApp::mock();

    let response = app.login(MOCK_EMAIL, "wrong").await;
    assert_eq!(response.location.as_deref(), Some("/login"));

    let page = app.get("/login").await;
    assert_eq!(page.flash(), Some("Invalid credentials"));
    assert!(!page.body.contains("You are signed in."));
}

#[tokio::test]
async fn failed_login_keeps_earlier_token() {
    let mut app = TestApp::mock();
    app.login(MOCK_EMAIL, MOCK_PASSWORD).await;

    app.login("someone@example.com", "nope").await;

    let page = app.get("/login").await;
    assert_eq!(page.flash(), Some("Invalid credentials"));
    assert!(page.body.contains("You are signed in."));
}

#[tokio::test]
async fn login_does_not_touch_cart() {
    let mut app = TestApp::mock();
    app.add_to_cart("2").await;

    app.login(MOCK_EMAIL, MOCK_PASSWORD).await;

    assert_eq!(app.get("/cart").await.cart_lines(), 1);
}

#[tokio::test]
async fn carts_are_per_visitor() {
    let state = mock_state();
    let mut alice = TestApp::from_router(shopnow_storefront::router(state.clone()));
    let mut bob = TestApp::from_router(shopnow_storefront::router(state));

    alice.add_to_cart("1").await;
    alice.add_to_cart("2").await;

    assert_eq!(alice.get("/cart").await.cart_lines(), 2);
    assert_eq!(bob.get("/cart").await.cart_lines(), 0);
}

async fn corrupt_cart(session: Session) -> StatusCode {
    let storage = SessionStorage::new(session);
    storage.set(keys::CART, "{not json".to_string()).await.unwrap();
    StatusCode::NO_CONTENT
}

/// Storefront routes plus an extra endpoint that writes a malformed cart.
fn app_with_corrupt_cart_route() -> TestApp {
    let state = mock_state();
    let router = shopnow_storefront::routes::routes()
        .route("/test/corrupt-cart", post(corrupt_cart))
        .layer(create_session_layer(state.config()))
        .with_state(state);
    TestApp::from_router(router)
}

#[tokio::test]
async fn malformed_cart_only_breaks_cart_views() {
    let mut app = app_with_corrupt_cart_route();
    app.add_to_cart("1").await;

    let response = app.post_form("/test/corrupt-cart", &[]).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.product_cards(), 3);

    let login = app.get("/login").await;
    assert_eq!(login.status, StatusCode::OK);

    let cart = app.get("/cart").await;
    assert_eq!(cart.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(cart.body.contains("Stored cart data could not be read"));

    let add = app.add_to_cart("2").await;
    assert_eq!(add.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn clear_recovers_from_malformed_cart() {
    let mut app = app_with_corrupt_cart_route();
    app.add_to_cart("1").await;
    app.post_form("/test/corrupt-cart", &[]).await;

    let response = app.post_form("/cart/clear", &[]).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let cart = app.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.cart_lines(), 0);
}
