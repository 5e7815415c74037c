//! OS signal handling.
//!
//! # Responsibilities
//! - Register handlers for termination requests (SIGINT, SIGTERM)
//! - Expose each one as a plain future that resolves when it arrives
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The coordinator never touches these APIs; callers pass the futures to
//!   [`ShutdownCoordinator::signal_on_any`](super::ShutdownCoordinator::signal_on_any)
//! - A handler that cannot be installed is logged and never fires, so a
//!   setup failure is not mistaken for a termination request

use std::future::Future;
use std::pin::Pin;

/// A boxed event source that resolves once.
pub type EventSource = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Resolve on Ctrl+C / SIGINT.
pub async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!(signal = "SIGINT", "Termination signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Resolve on SIGTERM.
#[cfg(unix)]
pub async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
            tracing::info!(signal = "SIGTERM", "Termination signal received");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

/// SIGTERM does not exist here; never resolves.
#[cfg(not(unix))]
pub async fn terminate() {
    std::future::pending::<()>().await;
}

/// All termination requests the process should react to.
pub fn termination() -> Vec<EventSource> {
    vec![Box::pin(ctrl_c()), Box::pin(terminate())]
}

/// Resolve after `duration`. Useful as a bounded-run event source.
pub async fn after(duration: std::time::Duration) {
    tokio::time::sleep(duration).await;
    tracing::info!(?duration, "Run duration elapsed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ShutdownCoordinator;
    use std::time::Duration;

    #[tokio::test]
    async fn timer_source_triggers_shutdown() {
        let coordinator = ShutdownCoordinator::new();
        let mut events = termination();
        events.push(Box::pin(after(Duration::from_millis(20))));

        tokio::time::timeout(Duration::from_secs(1), coordinator.signal_on_any(events))
            .await
            .expect("timer source should fire before the deadline");

        assert!(coordinator.is_signaled());
    }
}
