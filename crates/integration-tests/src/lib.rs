//! Integration tests for the ShopNow storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopnow-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_mock` - full router against the built-in mock backend
//! - `storefront_live` - full router against [`FakeApi`], an in-process
//!   REST backend on an ephemeral port
//!
//! [`TestApp`] drives the router with `tower::ServiceExt::oneshot` and carries
//! the session cookie from one request to the next, the way a browser would.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use shopnow_storefront::api::{ApiClient, Backend};
use shopnow_storefront::config::{BackendConfig, StorefrontConfig};
use shopnow_storefront::middleware::SESSION_COOKIE_NAME;
use shopnow_storefront::state::AppState;
use tower::ServiceExt;
use url::Url;

// =============================================================================
// TestApp
// =============================================================================

/// A storefront router plus the visitor's session cookie.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

impl TestResponse {
    /// The flash banner text, if the page rendered one.
    #[must_use]
    pub fn flash(&self) -> Option<&str> {
        let start = self.body.find("role=\"alert\">")? + "role=\"alert\">".len();
        let rest = self.body.get(start..)?;
        let end = rest.find('<')?;
        rest.get(..end)
    }

    /// Number of cart lines rendered on a cart page.
    #[must_use]
    pub fn cart_lines(&self) -> usize {
        self.body.matches("<li>").count()
    }

    /// Number of product cards rendered on the home page.
    #[must_use]
    pub fn product_cards(&self) -> usize {
        self.body.matches("class=\"card\"").count()
    }
}

impl TestApp {
    /// Wrap an already-built router.
    #[must_use]
    pub const fn from_router(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    /// Storefront running the built-in mock backend.
    #[must_use]
    pub fn mock() -> Self {
        Self::from_router(shopnow_storefront::router(mock_state()))
    }

    /// Storefront running against the REST backend at `api_url`.
    #[must_use]
    pub fn live(api_url: Url) -> Self {
        Self::from_router(shopnow_storefront::router(live_state(api_url)))
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self
            .request("GET", path)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    /// Send a form-encoded POST request.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let request = self
            .request("POST", path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("valid request");
        self.send(request).await
    }

    /// Add one unit of `product_id` to the cart.
    pub async fn add_to_cart(&mut self, product_id: &str) -> TestResponse {
        self.post_form("/cart/add", &[("product_id", product_id)])
            .await
    }

    /// Submit the login form.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }

    fn request(&self, method: &str, path: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(path);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        self.remember_cookie(response.headers());

        let status = response.status();
        let location = header_string(response.headers(), header::LOCATION.as_str());
        let request_id = header_string(response.headers(), "x-request-id");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            location,
            request_id,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn remember_cookie(&mut self, headers: &HeaderMap) {
        for value in headers.get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            let Some(pair) = value.split(';').next() else {
                continue;
            };
            let Some((name, session_id)) = pair.split_once('=') else {
                continue;
            };
            if name.trim() != SESSION_COOKIE_NAME {
                continue;
            }
            if session_id.is_empty() || value.contains("Max-Age=0") {
                self.cookie = None;
            } else {
                self.cookie = Some(pair.trim().to_string());
            }
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Application state with the mock backend.
#[must_use]
pub fn mock_state() -> AppState {
    AppState::new(StorefrontConfig::local(BackendConfig::Mock)).expect("mock backend")
}

/// Application state with a REST backend at `api_url`.
#[must_use]
pub fn live_state(api_url: Url) -> AppState {
    let config = StorefrontConfig::local(BackendConfig::Live {
        api_url: api_url.clone(),
    });
    let backend = Backend::Live(ApiClient::new(api_url).expect("http client"));
    AppState::with_backend(config, backend)
}

// =============================================================================
// FakeApi
// =============================================================================

/// Email accepted by [`FakeApi`].
pub const LIVE_EMAIL: &str = "buyer@example.com";
/// Password accepted by [`FakeApi`].
pub const LIVE_PASSWORD: &str = "s3cret";
/// Token issued by [`FakeApi`].
pub const LIVE_TOKEN: &str = "live-token-123";

/// A recorded `POST /api/orders` call.
#[derive(Debug, Clone)]
pub struct RecordedOrder {
    pub authorization: Option<String>,
    pub body: Value,
}

/// Counters and switches shared with the fake backend's handlers.
#[derive(Default)]
pub struct FakeApiState {
    pub product_calls: AtomicUsize,
    pub order_calls: AtomicUsize,
    pub login_calls: AtomicUsize,
    pub fail_products: AtomicBool,
    pub reject_orders: AtomicBool,
    pub orders: Mutex<Vec<RecordedOrder>>,
}

impl FakeApiState {
    #[must_use]
    pub fn order_calls(&self) -> usize {
        self.order_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn recorded_orders(&self) -> Vec<RecordedOrder> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// In-process REST backend on an ephemeral loopback port.
pub struct FakeApi {
    pub base_url: Url,
    pub state: Arc<FakeApiState>,
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

impl FakeApi {
    /// Bind and start serving in a background task.
    pub async fn spawn() -> Self {
        let state = Arc::new(FakeApiState::default());

        let app = Router::new()
            .route("/api/products", get(fake_products))
            .route("/api/orders", post(fake_orders))
            .route("/api/auth/login", post(fake_login))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake api");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api server");
        });

        let base_url = Url::parse(&format!("http://{addr}")).expect("fake api url");
        Self { base_url, state }
    }
}

async fn fake_products(State(state): State<Arc<FakeApiState>>) -> Response {
    state.product_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_products.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    Json(json!([
        {"_id": "65f0a1", "name": "Canvas Tote", "description": "Heavy cotton", "price": 24.5},
        {"id": "65f0a2", "name": "Enamel Mug", "description": "Holds 350ml", "price": 12}
    ]))
    .into_response()
}

async fn fake_orders(
    State(state): State<Arc<FakeApiState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.order_calls.fetch_add(1, Ordering::SeqCst);
    state
        .orders
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedOrder {
            authorization: header_string(&headers, header::AUTHORIZATION.as_str()),
            body,
        });

    if state.reject_orders.load(Ordering::SeqCst) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "Out of stock"})),
        )
            .into_response();
    }

    (StatusCode::CREATED, Json(json!({"orderId": "ord_1"}))).into_response()
}

async fn fake_login(
    State(state): State<Arc<FakeApiState>>,
    Json(body): Json<LoginBody>,
) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body.email == LIVE_EMAIL && body.password == LIVE_PASSWORD {
        Json(json!({"token": LIVE_TOKEN})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        )
            .into_response()
    }
}
