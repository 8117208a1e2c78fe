//! Configuration schema definitions.
//!
//! All types derive Serde traits and default every field, so a partially
//! filled structure is always a usable configuration.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServeConfig {
    /// Listener configuration (bind address, retry policy).
    pub listener: ListenerConfig,

    /// Static file serving.
    pub files: FilesConfig,

    /// Proxy passthrough settings.
    pub proxy: ProxyConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Delay between bind attempts in milliseconds.
    pub bind_retry_delay_ms: u64,

    /// Give up after this many failed bind attempts. `None` retries forever.
    pub max_bind_attempts: Option<u32>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            bind_retry_delay_ms: 2000,
            max_bind_attempts: None,
        }
    }
}

impl ListenerConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Static file serving configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Directory served at `/`.
    pub root: PathBuf,

    /// Render an HTML listing for directories without an `index.html`.
    pub directory_listing: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            directory_listing: true,
        }
    }
}

/// Proxy passthrough configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// `User-Agent` sent upstream. Some hosts refuse library defaults.
    pub user_agent: String,

    /// Upstream connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Longest wait for the next read from upstream, in seconds. Applies
    /// between chunks, so long streams that keep moving are not cut.
    pub read_timeout_secs: u64,

    /// Redirects followed before the fetch counts as failed.
    pub max_redirects: usize,

    /// Route upstream fetches through `HTTP_PROXY`/`HTTPS_PROXY` when set.
    pub use_env_proxy: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            user_agent: "curl/7.88.1".to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            max_redirects: 10,
            use_env_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
