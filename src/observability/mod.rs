//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → TraceLayer spans per request (http/server.rs)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filtered)
//! ```

pub mod logging;
