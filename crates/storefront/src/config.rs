//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_URL` - Base URL of the REST backend (only when `STOREFRONT_MODE=live`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: <http://localhost:3000>)
//! - `STOREFRONT_MODE` - `mock` or `live` (default: mock)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_SESSION_DAYS` - Visitor storage lifetime after last activity (default: 30)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Which catalog/order/auth backend to use
    pub backend: BackendConfig,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Days of inactivity after which visitor storage is dropped
    pub session_days: i64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Hardcoded catalog and credentials, no network calls.
    Mock,
    /// External REST API rooted at `api_url`.
    Live { api_url: Url },
}

/// Value of `STOREFRONT_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Mock,
    Live,
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "live" => Ok(Self::Live),
            other => Err(format!("expected 'mock' or 'live', got '{other}'")),
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Live => f.write_str("live"),
        }
    }
}

impl BackendConfig {
    /// The mode this backend runs in.
    #[must_use]
    pub const fn mode(&self) -> StoreMode {
        match self {
            Self::Mock => StoreMode::Mock,
            Self::Live { .. } => StoreMode::Live,
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let mode = get_env_or_default("STOREFRONT_MODE", "mock")
            .parse::<StoreMode>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_MODE".to_string(), e))?;

        match mode {
            StoreMode::Mock => Ok(Self::Mock),
            StoreMode::Live => {
                let raw = get_required_env("STOREFRONT_API_URL")?;
                let api_url = Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("STOREFRONT_API_URL".to_string(), e.to_string())
                })?;
                Ok(Self::Live { api_url })
            }
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable, or if
    /// live mode is selected without `STOREFRONT_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");
        let backend = BackendConfig::from_env()?;
        let static_dir =
            PathBuf::from(get_env_or_default("STOREFRONT_STATIC_DIR", "crates/storefront/static"));
        let session_days = parse_env("STOREFRONT_SESSION_DAYS", "30")?;

        Ok(Self {
            host,
            port,
            base_url,
            backend,
            static_dir,
            session_days,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Configuration for running the mock storefront locally.
    ///
    /// Used by tests and as a baseline when embedding the router.
    #[must_use]
    pub fn local(backend: BackendConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            backend,
            static_dir: PathBuf::from("crates/storefront/static"),
            session_days: 30,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_store_mode_parse() {
        assert_eq!("mock".parse::<StoreMode>().unwrap(), StoreMode::Mock);
        assert_eq!(" LIVE ".parse::<StoreMode>().unwrap(), StoreMode::Live);
        assert!("staging".parse::<StoreMode>().is_err());
    }

    #[test]
    fn test_backend_mode() {
        assert_eq!(BackendConfig::Mock.mode(), StoreMode::Mock);
        let live = BackendConfig::Live {
            api_url: Url::parse("http://api.local").unwrap(),
        };
        assert_eq!(live.mode(), StoreMode::Live);
        assert_eq!(live.mode().to_string(), "live");
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::local(BackendConfig::Mock);

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = StorefrontConfig::local(BackendConfig::Mock);
        assert!(!config.is_secure());

        config.base_url = "https://shop.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("SHOPNOW_TEST_UNSET_PORT_VAR", "8080").unwrap();
        assert_eq!(port, 8080);

        let err = parse_env::<u16>("SHOPNOW_TEST_UNSET_PORT_VAR", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
