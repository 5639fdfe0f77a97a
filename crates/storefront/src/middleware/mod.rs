//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. Request ID (`x-request-id`, generated if absent, echoed on the response)
//! 3. `TraceLayer` (request span carrying the request ID)
//! 4. Session layer (tower-sessions with in-memory store)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, make_request_span};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
