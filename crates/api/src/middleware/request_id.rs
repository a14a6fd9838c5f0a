//! Request correlation.
//!
//! Every request gets an `x-request-id` (kept if the client sent one),
//! the trace span records it, and the response echoes it back.

use axum::http::{HeaderName, Request};
use tracing::{Span, info_span};

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Builds the per-request trace span, tagged with the request id.
pub fn request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_span_builds_without_request_id() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        // No subscriber is installed, so the span is disabled but must still build.
        let _span = request_span(&request);
    }

    #[test]
    fn test_header_name() {
        assert_eq!(REQUEST_ID_HEADER.as_str(), "x-request-id");
    }
}
