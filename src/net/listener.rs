//! TCP listener acquisition.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Retry on a fixed delay while the port is unavailable
//! - Give up on shutdown or after the configured number of attempts

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;
use crate::lifecycle::ShutdownSignal;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured host is not an IP address.
    #[error("Invalid bind address {host:?}: {source}")]
    Address {
        host: String,
        #[source]
        source: AddrParseError,
    },

    /// Every permitted bind attempt failed.
    #[error("Failed to bind {addr} after {attempts} attempts: {source}")]
    AttemptsExhausted {
        addr: SocketAddr,
        attempts: u32,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the configured address, retrying until it succeeds.
///
/// Returns `Ok(None)` when shutdown is signalled while waiting between
/// attempts.
pub async fn bind_with_retry(
    config: &ListenerConfig,
    mut shutdown: ShutdownSignal,
) -> Result<Option<TcpListener>, ListenerError> {
    let addr = config.socket_addr().map_err(|source| ListenerError::Address {
        host: config.host.clone(),
        source,
    })?;
    let delay = Duration::from_millis(config.bind_retry_delay_ms);

    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        let error = match TcpListener::bind(addr).await {
            Ok(listener) => {
                tracing::debug!(address = %addr, attempts, "Listener bound");
                return Ok(Some(listener));
            }
            Err(e) => e,
        };

        if config.max_bind_attempts.is_some_and(|max| attempts >= max) {
            return Err(ListenerError::AttemptsExhausted {
                addr,
                attempts,
                source: error,
            });
        }

        tracing::warn!(
            address = %addr,
            attempt = attempts,
            error = %error,
            retry_in_ms = config.bind_retry_delay_ms,
            "Bind failed, retrying"
        );

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = shutdown.recv() => {
                tracing::info!(address = %addr, "Shutdown requested before listener was bound");
                return Ok(None);
            }
        }
    }
}
