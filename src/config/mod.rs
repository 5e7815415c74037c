//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → QuiesceConfig (validated, immutable)
//!     → handed to the supervisor at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once; the coordinator itself takes no configuration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::QuiesceConfig;
pub use schema::ShutdownConfig;
pub use schema::WorkerConfig;
