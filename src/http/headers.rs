//! Cross-origin isolation headers.
//!
//! Browsers only expose `SharedArrayBuffer` and friends to pages served with
//! both headers below. They are applied as the outermost response layer, so
//! static files, proxied bodies and error responses all carry them.

use axum::http::{HeaderName, HeaderValue};
use tower::layer::util::{Identity, Stack};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");

pub const REQUIRE_CORP: HeaderValue = HeaderValue::from_static("require-corp");
pub const SAME_ORIGIN: HeaderValue = HeaderValue::from_static("same-origin");

/// Layer stack that sets both isolation headers on every response.
pub type CrossOriginIsolationLayer = ServiceBuilder<
    Stack<
        SetResponseHeaderLayer<HeaderValue>,
        Stack<SetResponseHeaderLayer<HeaderValue>, Identity>,
    >,
>;

pub fn cross_origin_isolation() -> CrossOriginIsolationLayer {
    ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            CROSS_ORIGIN_EMBEDDER_POLICY,
            REQUIRE_CORP,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            CROSS_ORIGIN_OPENER_POLICY,
            SAME_ORIGIN,
        ))
}
