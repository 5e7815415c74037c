//! `quiesce` supervisor.
//!
//! Runs a fleet of workers tied to one [`ShutdownCoordinator`] and shuts
//! them down cleanly on SIGINT/SIGTERM (or after `--run-for` seconds).
//!
//! ```text
//!  SIGINT/SIGTERM ─┐
//!  run_for timer ──┼─▶ signal_on_any ─▶ signal() ─▶ workers clean up
//!                  │                       │              │
//!                  │                       │              └─▶ finish()
//!                  │                       └─▶ join() (bounded by drain_timeout)
//! ```

use std::path::PathBuf;

use clap::Parser;

use quiesce::config::loader::{load_config, ConfigError};
use quiesce::config::validation::validate_config;
use quiesce::config::QuiesceConfig;
use quiesce::lifecycle::signals::{self, EventSource};
use quiesce::lifecycle::startup::spawn_workers;
use quiesce::observability::logging::init_logging;
use quiesce::ShutdownCoordinator;

#[derive(Parser)]
#[command(name = "quiesce")]
#[command(about = "Run workers and shut them down gracefully", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of workers.
    #[arg(short, long)]
    workers: Option<usize>,

    /// Signal shutdown automatically after this many seconds.
    #[arg(long)]
    run_for: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => QuiesceConfig::default(),
    };
    if let Some(count) = cli.workers {
        config.workers.count = count;
    }
    if let Some(secs) = cli.run_for {
        config.shutdown.run_for_secs = Some(secs);
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    tracing::info!("quiesce v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        workers = config.workers.count,
        drain_timeout_secs = ?config.shutdown.drain_timeout_secs,
        run_for_secs = ?config.shutdown.run_for_secs,
        "Configuration loaded"
    );

    let coordinator = ShutdownCoordinator::new();
    let workers = spawn_workers(&coordinator, &config.workers);

    let mut events: Vec<EventSource> = signals::termination();
    if let Some(duration) = config.shutdown.run_for() {
        events.push(Box::pin(signals::after(duration)));
    }

    // The drain deadline only starts once shutdown is signaled.
    let mut signal = coordinator.subscribe();
    let supervisor = coordinator.signal_on_any(events);
    tokio::pin!(supervisor);

    tokio::select! {
        _ = &mut supervisor => {}
        _ = signal.recv() => {
            match config.shutdown.drain_timeout() {
                Some(deadline) => {
                    if tokio::time::timeout(deadline, &mut supervisor).await.is_err() {
                        tracing::error!(
                            outstanding = coordinator.outstanding(),
                            ?deadline,
                            "Workers did not finish before the drain deadline"
                        );
                        return Err("drain deadline exceeded".into());
                    }
                }
                None => supervisor.await,
            }
        }
    }

    for worker in workers {
        match worker.await {
            Ok(report) => {
                tracing::info!(worker = report.id, ticks = report.ticks, "Worker stopped")
            }
            Err(e) => tracing::warn!(error = %e, "Worker task failed"),
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
