//! Bidirectional shutdown coordination for Tokio services.
//!
//! Tasks register with a [`ShutdownCoordinator`], watch for the shutdown
//! signal, and report back once their cleanup is done, so a supervisor can
//! wait until everything has quiesced.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::QuiesceConfig;
pub use lifecycle::{Completion, ShutdownCoordinator, ShutdownSignal, ShutdownState};
