//! REST backend client.
//!
//! Endpoints, relative to the configured base URL:
//!
//! ```text
//! GET  /api/products    -> [{id, name, description, price}]
//! POST /api/orders      Authorization: Bearer <token>, {items: [{productId, quantity}]}
//! POST /api/auth/login  {email, password} -> {token}
//! ```

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use shopnow_core::{OrderRequest, Product};
use tracing::{debug, instrument};
use url::Url;

use super::{ApiError, StoreApi};
use crate::models::{AuthToken, Credentials};

const PRODUCTS_PATH: &str = "api/products";
const ORDERS_PATH: &str = "api/orders";
const LOGIN_PATH: &str = "api/auth/login";

/// Longest slice of a response body kept in errors and logs.
const BODY_SNIPPET_CHARS: usize = 200;

/// Client for the storefront REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

#[derive(Debug)]
struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    ///
    /// A trailing slash is added to the base path if missing so that
    /// endpoint paths are resolved beneath it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying client cannot be built.
    pub fn new(mut base_url: Url) -> Result<Self, ApiError> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("shopnow-storefront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { client, base_url }),
        })
    }

    /// The base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and decode the JSON body of a successful response.
    ///
    /// An empty success body decodes as JSON `null`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body = response_text.chars().take(BODY_SNIPPET_CHARS).collect::<String>();
            tracing::warn!(status = %status, body = %body, "API returned non-success status");
            return Err(ApiError::Status { status, body });
        }

        let text = if response_text.trim().is_empty() {
            "null"
        } else {
            response_text.as_str()
        };

        serde_json::from_str(text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(BODY_SNIPPET_CHARS).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(e)
        })
    }
}

impl StoreApi for ApiClient {
    fn submits_orders(&self) -> bool {
        true
    }

    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(PRODUCTS_PATH)?;
        let products: Vec<Product> = self.send(self.inner.client.get(url)).await?;
        debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    #[instrument(skip(self, token, order), fields(items = order.items.len()))]
    async fn place_order(
        &self,
        token: &AuthToken,
        order: &OrderRequest,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(ORDERS_PATH)?;
        let request = self
            .inner
            .client
            .post(url)
            .bearer_auth(token.expose())
            .json(order);
        self.send(request).await
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let url = self.endpoint(LOGIN_PATH)?;
        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };

        let response: Option<LoginResponse> =
            match self.send(self.inner.client.post(url).json(&body)).await {
                Ok(response) => response,
                Err(ApiError::Status {
                    status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                    ..
                }) => return Err(ApiError::InvalidCredentials),
                Err(e) => return Err(e),
            };

        response
            .and_then(|r| r.token)
            .and_then(AuthToken::new)
            .ok_or(ApiError::MissingToken)
    }
}
