//! Authentication types.
//!
//! Both types hold secrets and implement `Debug` manually so that neither the
//! password nor the token ends up in logs.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// An opaque bearer token.
///
/// Always non-empty: [`AuthToken::new`] refuses empty strings, matching the
/// rule that an empty stored token means "not logged in".
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// Wrap a token string. Returns `None` for an empty string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.is_empty() {
            None
        } else {
            Some(Self(SecretString::from(token)))
        }
    }

    /// The raw token, for the `Authorization` header and for storage.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

/// Login form credentials.
///
/// The email is free text; no format validation is applied.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from raw form input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(AuthToken::new("").is_none());
        assert_eq!(AuthToken::new("t0k").unwrap().expose(), "t0k");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = AuthToken::new("super_secret_token").unwrap();
        assert!(!format!("{token:?}").contains("super_secret_token"));

        let creds = Credentials::new("test@example.com", "hunter2");
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("test@example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
