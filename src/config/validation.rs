//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (counts and durations > 0)
//! - Reject unknown log levels
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: QuiesceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::QuiesceConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("workers.count must be at least 1")]
    NoWorkers,

    #[error("workers.tick_ms must be greater than 0")]
    ZeroTick,

    #[error("shutdown.drain_timeout_secs must be greater than 0 when set")]
    ZeroDrainTimeout,

    #[error("shutdown.run_for_secs must be greater than 0 when set")]
    ZeroRunFor,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &QuiesceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.workers.count == 0 {
        errors.push(ValidationError::NoWorkers);
    }
    if config.workers.tick_ms == 0 {
        errors.push(ValidationError::ZeroTick);
    }
    if config.shutdown.drain_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroDrainTimeout);
    }
    if config.shutdown.run_for_secs == Some(0) {
        errors.push(ValidationError::ZeroRunFor);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&QuiesceConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_error() {
        let mut config = QuiesceConfig::default();
        config.workers.count = 0;
        config.workers.tick_ms = 0;
        config.shutdown.drain_timeout_secs = Some(0);
        config.shutdown.run_for_secs = Some(0);
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NoWorkers,
                ValidationError::ZeroTick,
                ValidationError::ZeroDrainTimeout,
                ValidationError::ZeroRunFor,
                ValidationError::UnknownLogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = QuiesceConfig::default();
        config.observability.log_level = "DEBUG".into();
        assert!(validate_config(&config).is_ok());
    }
}
