//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, trace + isolation layers)
//!     → dispatch.rs (proxy prefix check)
//!         → proxy.rs (decode target, fetch, stream body)
//!         → static_files.rs (ServeDir, listing.rs for bare directories)
//!     → headers.rs (COEP/COOP added on the way out)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod headers;
pub mod listing;
pub mod proxy;
pub mod server;
pub mod static_files;

pub use server::{AppState, HttpServer, ServerError};
