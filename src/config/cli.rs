//! Command line arguments.

use clap::Parser;

/// Serve the working directory with cross-origin isolation headers and a
/// base64 proxy passthrough under `/proxy/`.
#[derive(Debug, Clone, Parser)]
#[command(name = "coi-serve", version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on (default 8000).
    #[arg(value_name = "PORT")]
    pub port: Option<u16>,
}
