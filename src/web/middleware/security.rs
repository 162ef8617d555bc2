//! Response hardening for every page and file route.

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Headers forced onto every response.
///
/// Framing stays same-origin: the viewer page embeds `/render/:filename`.
const FIXED_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Used when a handler did not pick its own caching policy.
const DEFAULT_CACHE_CONTROL: &str = "no-store, max-age=0";

/// Apply [`FIXED_HEADERS`] and a default `Cache-Control`.
///
/// The file list and viewer pages reflect the upload directory at request
/// time, so nothing is cached unless a handler says otherwise.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in FIXED_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    headers
        .entry(header::CACHE_CONTROL)
        .or_insert(HeaderValue::from_static(DEFAULT_CACHE_CONTROL));

    response
}
