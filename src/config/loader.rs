//! Configuration assembly from defaults and command line.

use thiserror::Error;

use crate::config::cli::Cli;
use crate::config::schema::ServeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Overlay the command line on the defaults and validate the result.
pub fn load_config(cli: &Cli) -> Result<ServeConfig, ConfigError> {
    let mut config = ServeConfig::default();
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
