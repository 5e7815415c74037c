//! Worker fleet orchestration.
//!
//! # Responsibilities
//! - Register every worker with the coordinator before it starts
//! - Run each worker until shutdown is signaled
//! - Run per-worker cleanup, then report completion
//!
//! # Design Decisions
//! - Registration happens on the spawning task, so a shutdown signaled
//!   right after `spawn_workers` returns still waits for every worker
//! - Workers stop ticking as soon as the signal is observed; cleanup time
//!   is not bounded here (the supervisor owns the drain deadline)

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;

use crate::config::WorkerConfig;
use crate::lifecycle::shutdown::{Completion, ShutdownCoordinator, ShutdownSignal};

/// What a worker did before it shut down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    pub id: usize,
    pub ticks: u64,
}

/// Spawn `config.count` workers tied to `coordinator`.
pub fn spawn_workers(
    coordinator: &ShutdownCoordinator,
    config: &WorkerConfig,
) -> Vec<JoinHandle<WorkerReport>> {
    tracing::info!(
        count = config.count,
        tick_ms = config.tick_ms,
        cleanup_ms = config.cleanup_ms,
        "Starting workers"
    );

    (0..config.count)
        .map(|id| {
            let (signal, completion) = coordinator.register();
            tokio::spawn(run_worker(
                id,
                signal,
                completion,
                config.tick(),
                config.cleanup(),
            ))
        })
        .collect()
}

/// Tick every `tick` until `signal` fires, clean up for `cleanup`, then
/// finish `completion`.
pub async fn run_worker(
    id: usize,
    mut signal: ShutdownSignal,
    completion: Completion,
    tick: Duration,
    cleanup: Duration,
) -> WorkerReport {
    let mut ticker = time::interval(tick);
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = signal.recv() => {
                tracing::debug!(worker = id, ticks, "Worker received shutdown signal");
                break;
            }
            _ = ticker.tick() => {
                ticks += 1;
                tracing::trace!(worker = id, ticks, "Worker tick");
            }
        }
    }

    if !cleanup.is_zero() {
        time::sleep(cleanup).await;
    }

    tracing::debug!(worker = id, "Worker cleanup complete");
    completion.finish();

    WorkerReport { id, ticks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn workers_register_before_spawn() {
        let coordinator = ShutdownCoordinator::new();
        let config = WorkerConfig {
            count: 3,
            tick_ms: 10,
            cleanup_ms: 0,
        };

        let handles = spawn_workers(&coordinator, &config);
        assert_eq!(coordinator.outstanding(), 3);

        coordinator.signal_and_join().await;
        assert_eq!(coordinator.outstanding(), 0);

        let mut ids: Vec<_> = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn worker_ticks_until_signaled() {
        let coordinator = ShutdownCoordinator::new();
        let (signal, completion) = coordinator.register();

        let worker = tokio::spawn(run_worker(
            0,
            signal,
            completion,
            Duration::from_millis(100),
            Duration::from_millis(50),
        ));

        time::sleep(Duration::from_millis(350)).await;
        coordinator.signal_and_join().await;

        let report = worker.await.unwrap();
        assert!(report.ticks >= 3, "expected at least 3 ticks, got {}", report.ticks);
    }
}
