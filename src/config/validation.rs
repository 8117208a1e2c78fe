//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap and serde handle syntax)
//! - Validate value ranges (retry delay, attempts and read timeout > 0)
//! - Check the served root exists before binding

use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::ServeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.host {0:?} is not an IP address")]
    InvalidHost(String),

    #[error("listener.bind_retry_delay_ms must be greater than zero")]
    ZeroRetryDelay,

    #[error("listener.max_bind_attempts must be greater than zero")]
    ZeroBindAttempts,

    #[error("files.root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("proxy.user_agent is not a valid header value")]
    InvalidUserAgent,

    #[error("proxy.read_timeout_secs must be greater than zero")]
    ZeroReadTimeout,
}

/// Check every rule and report all failures at once.
pub fn validate_config(config: &ServeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.socket_addr().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }
    if config.listener.bind_retry_delay_ms == 0 {
        errors.push(ValidationError::ZeroRetryDelay);
    }
    if config.listener.max_bind_attempts == Some(0) {
        errors.push(ValidationError::ZeroBindAttempts);
    }
    if !config.files.root.is_dir() {
        errors.push(ValidationError::RootNotDirectory(config.files.root.clone()));
    }
    if HeaderValue::from_str(&config.proxy.user_agent).is_err() {
        errors.push(ValidationError::InvalidUserAgent);
    }
    if config.proxy.read_timeout_secs == 0 {
        errors.push(ValidationError::ZeroReadTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
