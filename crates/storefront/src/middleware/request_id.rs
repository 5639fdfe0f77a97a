//! Request ID propagation.
//!
//! IDs are assigned by tower-http's `SetRequestIdLayer` (keeping any ID an
//! upstream proxy already set) and copied onto the response by
//! `PropagateRequestIdLayer`. This module supplies the header name and the
//! span constructor that records the ID for logs and Sentry.

use axum::{extract::Request, http::HeaderName};
use tracing::Span;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Build the tracing span for a request, tagged with its request ID.
pub fn make_request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", request_id);
    });

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
