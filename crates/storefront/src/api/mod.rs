//! Catalog, order and authentication backends.
//!
//! # Architecture
//!
//! - [`StoreApi`] is the seam the services are written against
//! - [`MockStore`] serves a fixed catalog and a single credential pair, no I/O
//! - [`ApiClient`] talks to the REST backend with `reqwest`
//! - [`Backend`] is whichever of the two the configuration selected
//!
//! No call is retried, no response is cached, and no timeout is set beyond
//! the transport defaults. A failure is reported once and the visitor
//! re-triggers the action.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopnow_storefront::api::{Backend, StoreApi};
//!
//! let backend = Backend::from_config(&config.backend)?;
//! let products = backend.list_products().await?;
//! ```

mod client;
mod mock;

pub use client::ApiClient;
pub use mock::{MOCK_EMAIL, MOCK_PASSWORD, MOCK_TOKEN, MockStore};

use shopnow_core::{OrderRequest, Product};
use thiserror::Error;

use crate::config::BackendConfig;
use crate::models::{AuthToken, Credentials};

/// Errors that can occur when talking to a backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The credentials were rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A login response carried no usable token.
    #[error("login response did not contain a token")]
    MissingToken,

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Operations the storefront needs from a backend.
#[allow(async_fn_in_trait)]
pub trait StoreApi {
    /// Whether checkout submits an order over the network.
    ///
    /// When `false`, checkout is an acknowledgment only: the cart is cleared
    /// without reading it and no token is required.
    fn submits_orders(&self) -> bool;

    /// Fetch the product catalog.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Submit an order on behalf of the token holder.
    ///
    /// Returns the backend's confirmation, whose shape is not interpreted.
    async fn place_order(
        &self,
        token: &AuthToken,
        order: &OrderRequest,
    ) -> Result<serde_json::Value, ApiError>;

    /// Exchange credentials for a token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError>;
}

/// The backend selected by configuration.
#[derive(Debug, Clone)]
pub enum Backend {
    Mock(MockStore),
    Live(ApiClient),
}

impl Backend {
    /// Build the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be constructed.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ApiError> {
        match config {
            BackendConfig::Mock => Ok(Self::Mock(MockStore::new())),
            BackendConfig::Live { api_url } => Ok(Self::Live(ApiClient::new(api_url.clone())?)),
        }
    }
}

impl StoreApi for Backend {
    fn submits_orders(&self) -> bool {
        match self {
            Self::Mock(mock) => mock.submits_orders(),
            Self::Live(client) => client.submits_orders(),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        match self {
            Self::Mock(mock) => mock.list_products().await,
            Self::Live(client) => client.list_products().await,
        }
    }

    async fn place_order(
        &self,
        token: &AuthToken,
        order: &OrderRequest,
    ) -> Result<serde_json::Value, ApiError> {
        match self {
            Self::Mock(mock) => mock.place_order(token, order).await,
            Self::Live(client) => client.place_order(token, order).await,
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        match self {
            Self::Mock(mock) => mock.authenticate(credentials).await,
            Self::Live(client) => client.authenticate(credentials).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn test_from_config_selects_variant() {
        let mock = Backend::from_config(&BackendConfig::Mock).unwrap();
        assert!(matches!(mock, Backend::Mock(_)));
        assert!(!mock.submits_orders());

        let live = Backend::from_config(&BackendConfig::Live {
            api_url: Url::parse("http://127.0.0.1:9").unwrap(),
        })
        .unwrap();
        assert!(matches!(live, Backend::Live(_)));
        assert!(live.submits_orders());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "invalid credentials");
        let err = ApiError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502 Bad Gateway: upstream down");
    }
}
