//! One-shot acknowledgment messages.
//!
//! An action stores a message here and redirects; the next rendered page
//! takes it and shows it once. Every outcome, success or failure, is
//! reported this way with no categorization.

use tower_sessions::Session;

/// Session key for the pending message. Not part of visitor storage.
const FLASH_KEY: &str = "flash";

/// Queue `message` for the next rendered page, replacing any pending one.
pub async fn set(session: &Session, message: impl Into<String>) {
    let message = message.into();
    if let Err(e) = session.insert(FLASH_KEY, &message).await {
        tracing::error!("Failed to store flash message: {e}");
    }
}

/// Take the pending message, if any.
pub async fn take(session: &Session) -> Option<String> {
    session
        .remove::<String>(FLASH_KEY)
        .await
        .inspect_err(|e| tracing::warn!("Failed to read flash message: {e}"))
        .ok()
        .flatten()
}
