//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use quiesce::ShutdownCoordinator;

/// Register a worker that waits for shutdown, sleeps for `cleanup`, sets the
/// returned flag, then finishes.
pub fn spawn_flagging_worker(
    coordinator: &ShutdownCoordinator,
    cleanup: Duration,
) -> Arc<AtomicBool> {
    let (mut signal, completion) = coordinator.register();
    let flag = Arc::new(AtomicBool::new(false));
    let done = flag.clone();

    tokio::spawn(async move {
        signal.recv().await;
        if !cleanup.is_zero() {
            tokio::time::sleep(cleanup).await;
        }
        done.store(true, Ordering::SeqCst);
        completion.finish();
    });

    flag
}

/// Deadline used by tests that expect an operation to return promptly.
#[allow(dead_code)]
pub const PROMPT: Duration = Duration::from_secs(1);
