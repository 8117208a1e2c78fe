//! Base64 proxy passthrough.
//!
//! `GET /proxy/<base64>` decodes the segment to an ASCII URL, fetches it and
//! streams the upstream body back with status 200. Upstream status codes are
//! not propagated. When the fetch itself fails the client gets an empty 200;
//! when the upstream stream breaks midway the client stream is cut short.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures_util::TryStreamExt;
use thiserror::Error;
use url::Url;

use crate::config::ProxyConfig;

/// Errors raised while handling a proxy request.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("proxy target is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("proxy target is not ASCII")]
    NonAsciiTarget,

    #[error("proxy target is not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            // Fetch failures are reported as an empty success, never as 5xx.
            ProxyError::Upstream(_) => StatusCode::OK.into_response(),
            other => (StatusCode::BAD_REQUEST, other.to_string()).into_response(),
        }
    }
}

/// Build the outbound HTTP client.
pub fn build_client(config: &ProxyConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .read_timeout(Duration::from_secs(config.read_timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects));
    if !config.use_env_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// Decode a base64 path segment into the target URL string.
pub fn decode_target(encoded: &str) -> Result<String, ProxyError> {
    let bytes = STANDARD.decode(encoded)?;
    if !bytes.is_ascii() {
        return Err(ProxyError::NonAsciiTarget);
    }
    String::from_utf8(bytes).map_err(|_| ProxyError::NonAsciiTarget)
}

/// Handle a proxy request for the already-stripped `encoded` segment.
pub async fn forward(client: &reqwest::Client, encoded: &str) -> Result<Response, ProxyError> {
    let target = decode_target(encoded).inspect_err(|e| {
        tracing::warn!(segment = %encoded, error = %e, "Rejected proxy target");
    })?;
    let url = Url::parse(&target).inspect_err(|e| {
        tracing::warn!(target = %target, error = %e, "Rejected proxy target");
    })?;

    tracing::debug!(target = %url, "Fetching proxy target");

    match fetch(client, url.clone()).await {
        Ok(upstream) => Ok(stream_body(upstream)),
        Err(e) => {
            tracing::warn!(target = %url, error = %e, "Upstream fetch failed");
            Err(e)
        }
    }
}

async fn fetch(client: &reqwest::Client, url: Url) -> Result<reqwest::Response, ProxyError> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response)
}

/// Turn the upstream response into a 200 whose body is copied chunk by chunk.
fn stream_body(upstream: reqwest::Response) -> Response {
    let content_length: Option<HeaderValue> = upstream.headers().get(header::CONTENT_LENGTH).cloned();
    let url = upstream.url().clone();

    let stream = upstream.bytes_stream().inspect_err(move |e| {
        tracing::warn!(target = %url, error = %e, "Upstream stream interrupted");
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = StatusCode::OK;
    if let Some(length) = content_length {
        response.headers_mut().insert(header::CONTENT_LENGTH, length);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_example_scenario() {
        assert_eq!(
            decode_target("aHR0cDovL2V4YW1wbGUuY29t").unwrap(),
            "http://example.com"
        );
    }

    #[test]
    fn encode_decode_round_trip() {
        for url in [
            "http://example.com",
            "https://example.com/a/b?c=d&e=f#frag",
            "http://127.0.0.1:8080/",
            "https://cdn.example.org/assets/app.wasm?v=1.2.3~x",
        ] {
            assert_eq!(decode_target(&STANDARD.encode(url)).unwrap(), url);
        }
    }

    #[test]
    fn rejects_malformed_base64() {
        assert!(matches!(
            decode_target("%%%not-base64%%%"),
            Err(ProxyError::InvalidBase64(_))
        ));
        // Missing padding.
        assert!(matches!(
            decode_target("aHR0cDovL2E"),
            Err(ProxyError::InvalidBase64(_))
        ));
    }

    #[test]
    fn rejects_non_ascii_targets() {
        let encoded = STANDARD.encode("http://exämple.com".as_bytes());
        assert!(matches!(decode_target(&encoded), Err(ProxyError::NonAsciiTarget)));

        let encoded = STANDARD.encode([0xff, 0xfe, 0x00]);
        assert!(matches!(decode_target(&encoded), Err(ProxyError::NonAsciiTarget)));
    }

    #[test]
    fn decode_errors_map_to_bad_request() {
        let response = ProxyError::NonAsciiTarget.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ProxyError::InvalidUrl(url::ParseError::RelativeUrlWithoutBase).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn client_builds_from_defaults() {
        assert!(build_client(&ProxyConfig::default()).is_ok());
    }
}
