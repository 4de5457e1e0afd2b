//! Request identification and credential extraction.
//!
//! # Responsibilities
//! - Assign every request a UUID v4 `x-request-id` (kept if the client sent one)
//! - Echo the request ID on the response
//! - Read the admin credentials the UI sends with each call
//!
//! # Design Decisions
//! - Request ID added as early as possible so the trace span carries it
//! - Credentials are read per request and dropped with it

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::gateway::Credentials;

/// Request correlation header.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Header carrying the admin API base URL.
pub const X_GATEWAY_URL: HeaderName = HeaderName::from_static("x-apisix-url");

/// Header carrying the admin API key.
pub const X_GATEWAY_KEY: HeaderName = HeaderName::from_static("x-apisix-key");

/// Layer assigning a request ID to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer copying the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Request ID of a request, `"unknown"` if none was assigned.
pub fn request_id(request: &Request<Body>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Credentials from the request headers.
///
/// Missing headers yield empty fields; the gateway client rejects those
/// with `ConfigurationMissing` before any call is made.
pub fn credentials(headers: &HeaderMap) -> Credentials {
    let read = |name: &HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .trim()
            .to_string()
    };
    Credentials::new(read(&X_GATEWAY_URL), read(&X_GATEWAY_KEY))
}
