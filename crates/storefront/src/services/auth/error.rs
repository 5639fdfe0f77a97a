//! Authentication error types.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the credentials or could not be reached.
    #[error("login rejected: {0}")]
    Rejected(#[from] ApiError),

    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
