//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig
//!     → listener.rs (bind, retrying while the port is taken)
//!     → tokio TcpListener handed to the HTTP layer
//! ```
//!
//! # Design Decisions
//! - A busy port is expected during local development restarts, so bind
//!   failures are retried on a fixed delay instead of aborting
//! - Waiting for the port can be interrupted by shutdown

pub mod listener;

pub use listener::{bind_with_retry, ListenerError};
