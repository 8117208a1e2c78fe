//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the axum Router with the dispatcher as its only handler
//! - Wire up middleware (tracing, cross-origin isolation headers)
//! - Build the outbound client used by the proxy
//! - Serve on a bound listener until shutdown, draining in-flight requests

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServeConfig;
use crate::http::dispatch::dispatch;
use crate::http::headers::cross_origin_isolation;
use crate::http::proxy;
use crate::http::static_files::StaticFiles;
use crate::lifecycle::ShutdownSignal;

/// Error type for the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub files: Arc<StaticFiles>,
}

/// HTTP server for static files and the proxy passthrough.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServeConfig) -> Result<Self, ServerError> {
        let client = proxy::build_client(&config.proxy)?;
        let files = Arc::new(StaticFiles::new(&config.files));

        tracing::info!(
            root = %files.root().display(),
            directory_listing = config.files.directory_listing,
            user_agent = %config.proxy.user_agent,
            "HTTP server configured"
        );

        let router = Self::build_router(AppState { client, files });
        Ok(Self { router })
    }

    /// Build the axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(cross_origin_isolation())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Every response produced by the router carries the isolation headers.
    /// Responses hyper writes on its own before a request reaches the router
    /// (400 for an unparseable request head, 431 for oversized headers) do not.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
