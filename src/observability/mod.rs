//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! lifecycle/ (register, signal, finish, join)
//!     → tracing events with structured fields
//!     → logging.rs subscriber (pretty or JSON on stdout)
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - `RUST_LOG` overrides the configured level
//! - The library only emits events; installing a subscriber is the binary's job

pub mod logging;
