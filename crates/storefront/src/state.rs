//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::{ApiError, Backend};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the selected backend. It holds no per-visitor data;
/// that lives in each visitor's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: Backend,
}

impl AppState {
    /// Create a new application state with the backend `config` selects.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self, ApiError> {
        let backend = Backend::from_config(&config.backend)?;
        Ok(Self::with_backend(config, backend))
    }

    /// Create a state around an already-built backend.
    #[must_use]
    pub fn with_backend(config: StorefrontConfig, backend: Backend) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, backend }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the selected backend.
    #[must_use]
    pub fn backend(&self) -> &Backend {
        &self.inner.backend
    }
}
