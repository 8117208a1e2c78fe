//! Local static file server for cross-origin isolated pages.
//!
//! Every response carries `Cross-Origin-Embedder-Policy: require-corp` and
//! `Cross-Origin-Opener-Policy: same-origin`. Requests for
//! `/proxy/<base64 url>` are fetched upstream and streamed back, which lets
//! isolated pages load third-party resources through the same origin.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ServeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
