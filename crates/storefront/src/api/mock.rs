//! Built-in backend with hardcoded data.

use secrecy::ExposeSecret;
use shopnow_core::{OrderRequest, Price, Product};
use tracing::debug;

use super::{ApiError, StoreApi};
use crate::models::{AuthToken, Credentials};

/// The only email the mock backend accepts.
pub const MOCK_EMAIL: &str = "test@example.com";

/// The only password the mock backend accepts.
pub const MOCK_PASSWORD: &str = "password";

/// Token handed out on a successful mock login.
pub const MOCK_TOKEN: &str = "mock-token";

/// Backend serving a fixed catalog and a single credential pair.
#[derive(Debug, Clone)]
pub struct MockStore {
    products: Vec<Product>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    /// Create the mock backend with its three sample products.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: vec![
                Product::new(
                    "1",
                    "Mock Product 1",
                    "A sample product",
                    Price::from_cents(1999),
                ),
                Product::new("2", "Mock Product 2", "Another item", Price::from_cents(2999)),
                Product::new("3", "Mock Product 3", "Great value", Price::from_cents(999)),
            ],
        }
    }
}

impl StoreApi for MockStore {
    fn submits_orders(&self) -> bool {
        false
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.products.clone())
    }

    async fn place_order(
        &self,
        _token: &AuthToken,
        order: &OrderRequest,
    ) -> Result<serde_json::Value, ApiError> {
        debug!(items = order.items.len(), "mock order accepted");
        Ok(serde_json::Value::Null)
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        if credentials.email == MOCK_EMAIL && credentials.password.expose_secret() == MOCK_PASSWORD
        {
            AuthToken::new(MOCK_TOKEN).ok_or(ApiError::MissingToken)
        } else {
            Err(ApiError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catalog() {
        let store = MockStore::new();
        let products = store.list_products().await.unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "Mock Product 1");
        assert_eq!(products[2].price.to_string(), "$9.99");
    }

    #[tokio::test]
    async fn test_authenticate_fixed_pair() {
        let store = MockStore::new();

        let token = store
            .authenticate(&Credentials::new(MOCK_EMAIL, MOCK_PASSWORD))
            .await
            .unwrap();
        assert_eq!(token.expose(), MOCK_TOKEN);

        let wrong_password = store
            .authenticate(&Credentials::new(MOCK_EMAIL, "Password"))
            .await;
        assert!(matches!(wrong_password, Err(ApiError::InvalidCredentials)));

        let wrong_email = store
            .authenticate(&Credentials::new("TEST@example.com", MOCK_PASSWORD))
            .await;
        assert!(matches!(wrong_email, Err(ApiError::InvalidCredentials)));
    }
}
