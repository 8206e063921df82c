//! Propagacion de X-Request-Id.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request, Response},
};
use uuid::Uuid;

/// Header name for request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Returns the inbound request ID, generating one when it is missing.
///
/// An absent, empty or non-UTF-8 header is replaced by a fresh UUID v4,
/// which is also written into the request headers so handlers can read it.
pub fn ensure_request_id(request: &mut Request<Body>) -> String {
    let existing = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from);

    if let Some(id) = existing {
        return id;
    }

    let id = Uuid::new_v4().to_string();

    // Add request ID to request headers (for handlers to access)
    if let Ok(value) = HeaderValue::from_str(&id) {
        request
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }

    id
}

/// Echoes the request ID on the response.
pub fn set_response_request_id(response: &mut Response<Body>, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), value);
    }
}
