//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::Deserialize;
use std::time::Duration;

/// Root configuration for the `quiesce` supervisor.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QuiesceConfig {
    /// Simulated worker fleet.
    pub workers: WorkerConfig,

    /// Shutdown behaviour of the supervisor.
    pub shutdown: ShutdownConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Worker fleet configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of workers to spawn.
    pub count: usize,

    /// Interval between units of work in milliseconds.
    pub tick_ms: u64,

    /// Time each worker spends cleaning up after shutdown, in milliseconds.
    pub cleanup_ms: u64,
}

impl WorkerConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn cleanup(&self) -> Duration {
        Duration::from_millis(self.cleanup_ms)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: 4,
            tick_ms: 250,
            cleanup_ms: 500,
        }
    }
}

/// Supervisor shutdown configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Deadline for all workers to finish after shutdown is signaled.
    /// `None` waits forever.
    pub drain_timeout_secs: Option<u64>,

    /// Signal shutdown automatically after this many seconds.
    pub run_for_secs: Option<u64>,
}

impl ShutdownConfig {
    pub fn drain_timeout(&self) -> Option<Duration> {
        self.drain_timeout_secs.map(Duration::from_secs)
    }

    pub fn run_for(&self) -> Option<Duration> {
        self.run_for_secs.map(Duration::from_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            drain_timeout_secs: Some(30),
            run_for_secs: None,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
