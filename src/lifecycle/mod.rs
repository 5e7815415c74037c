//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     register() per worker → spawn worker tasks
//!
//! Shutdown (shutdown.rs):
//!     signal() → workers observe ShutdownSignal → cleanup
//!     → Completion::finish() → outstanding hits 0 → join() returns
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → event sources for signal_on_any()
//! ```
//!
//! # Design Decisions
//! - One coordinator per process lifetime; it cannot be reset
//! - The coordinator is passed explicitly, never stored in a global
//! - No built-in deadline: callers wrap join() in their own timeout

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Completion, ShutdownCoordinator, ShutdownSignal, ShutdownState};
