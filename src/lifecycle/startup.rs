//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the HTTP server from a validated config
//! - Bind the listener, retrying while the port is busy
//! - Announce the port and serve until shutdown

use thiserror::Error;

use crate::config::ServeConfig;
use crate::http::server::{HttpServer, ServerError};
use crate::lifecycle::Shutdown;
use crate::net::listener::{bind_with_retry, ListenerError};

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

/// Bind and serve until `shutdown` is triggered.
pub async fn serve(config: ServeConfig, shutdown: &Shutdown) -> Result<(), StartupError> {
    let bind_shutdown = shutdown.subscribe();
    let server_shutdown = shutdown.subscribe();

    let listener_config = config.listener.clone();
    let server = HttpServer::new(config)?;

    let Some(listener) = bind_with_retry(&listener_config, bind_shutdown).await? else {
        return Ok(());
    };
    let local_addr = listener.local_addr().map_err(ServerError::Io)?;

    tracing::info!(address = %local_addr, "Serving on port {}", local_addr.port());

    server.run(listener, server_shutdown).await?;
    Ok(())
}
