//! Authentication service.
//!
//! Authentication state is the presence of a token under [`keys::TOKEN`] in
//! visitor storage and nothing else. There is no session validation, expiry
//! check or refresh.

mod error;

pub use error::AuthError;

use tracing::{info, instrument, warn};

use crate::api::StoreApi;
use crate::models::{AuthToken, Credentials};
use crate::storage::{Storage, StorageError, keys};

/// Read the stored token. An empty stored string counts as no token.
///
/// # Errors
///
/// Returns `StorageError` if storage fails.
pub async fn load_token<S: Storage>(storage: &S) -> Result<Option<AuthToken>, StorageError> {
    Ok(storage.get(keys::TOKEN).await?.and_then(AuthToken::new))
}

/// Store `token`, replacing any previous one.
///
/// # Errors
///
/// Returns `StorageError` if storage fails.
pub async fn store_token<S: Storage>(storage: &S, token: &AuthToken) -> Result<(), StorageError> {
    storage.set(keys::TOKEN, token.expose().to_string()).await
}

/// Whether a token is stored.
///
/// # Errors
///
/// Returns `StorageError` if storage fails.
pub async fn is_authenticated<S: Storage>(storage: &S) -> Result<bool, StorageError> {
    Ok(load_token(storage).await?.is_some())
}

/// Authenticate against the backend and store the resulting token.
///
/// On failure storage is not touched, so a previously unset token stays
/// unset.
///
/// # Errors
///
/// Returns `AuthError::Rejected` if the backend refuses the credentials or
/// fails, or `AuthError::Storage` if the token cannot be stored.
#[instrument(skip(api, storage, credentials), fields(email = %credentials.email))]
pub async fn login<A, S>(api: &A, storage: &S, credentials: &Credentials) -> Result<(), AuthError>
where
    A: StoreApi,
    S: Storage,
{
    let token = api.authenticate(credentials).await.inspect_err(|e| {
        warn!(error = %e, "login failed");
    })?;

    store_token(storage, &token).await?;
    info!("login succeeded");
    Ok(())
}
