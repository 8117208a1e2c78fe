//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (optional port)
//!     → cli.rs (clap parsing)
//!     → loader.rs (overlay on defaults)
//!     → validation.rs (semantic checks)
//!     → ServeConfig (validated, immutable)
//!     → handed to startup and the HTTP server
//! ```
//!
//! # Design Decisions
//! - There is no config file; every field has a default
//! - The port is the only value taken from the command line
//! - Validation separates parsing (clap) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use schema::{FilesConfig, ListenerConfig, ObservabilityConfig, ProxyConfig, ServeConfig};
