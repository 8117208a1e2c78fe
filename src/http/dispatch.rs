//! Request dispatch.
//!
//! Every request lands here. `GET` requests whose path starts with the
//! literal bytes `/proxy/` go to the proxy forwarder; everything else is
//! handed to the static file service untouched.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};

use crate::http::proxy;
use crate::http::server::AppState;

/// Path prefix that marks a proxy request.
pub const PROXY_PATH_PREFIX: &str = "/proxy/";

/// The encoded proxy target, if `path` is a proxy path.
///
/// Case-sensitive and without any normalization.
pub fn proxy_target_segment(path: &str) -> Option<&str> {
    path.strip_prefix(PROXY_PATH_PREFIX)
}

/// Fallback handler for the whole router.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    if request.method() == Method::GET {
        if let Some(encoded) = proxy_target_segment(request.uri().path()) {
            return proxy::forward(&state.client, encoded).await.into_response();
        }
    }

    state.files.serve(request).await
}
