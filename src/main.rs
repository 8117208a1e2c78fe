//! coi-serve
//!
//! ```text
//!     Client Request
//!     ─────────────────▶ listener ──▶ dispatch ──┬─▶ /proxy/<b64> ──▶ upstream fetch
//!                                                 │        (streamed back, 200)
//!                                                 └─▶ static files (cwd)
//!     Client Response
//!     ◀───────────────── + Cross-Origin-Embedder-Policy / Cross-Origin-Opener-Policy
//! ```

use clap::Parser;

use coi_serve::config::loader::load_config;
use coi_serve::config::Cli;
use coi_serve::lifecycle::{signals, startup, Shutdown};
use coi_serve::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    logging::init(&config.observability);

    tracing::info!(
        port = config.listener.port,
        host = %config.listener.host,
        bind_retry_delay_ms = config.listener.bind_retry_delay_ms,
        "coi-serve v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    startup::serve(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
