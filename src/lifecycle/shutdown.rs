//! Shutdown coordination between a supervisor and its workers.
//!
//! A [`ShutdownCoordinator`] carries two pieces of shared state:
//! - a one-shot `signaled` flag that fans out to every current and future
//!   [`ShutdownSignal`], and
//! - an `outstanding` count of participants that registered but have not
//!   yet reported back through their [`Completion`].
//!
//! Both live in `tokio::sync::watch` channels. The flag channel only ever
//! moves from `false` to `true`; the count channel is mutated under its own
//! lock with `send_modify`, so an update and the wake-up of every joiner
//! waiting on it happen as one step.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::select_all;
use tokio::sync::watch;

/// Lifecycle state of a coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownState {
    /// Shutdown has not been signaled.
    Idle,
    /// Shutdown was signaled and participants are still cleaning up.
    ShuttingDown,
    /// Shutdown was signaled and every participant has finished.
    Quiesced,
}

#[derive(Debug)]
struct Inner {
    signaled: watch::Sender<bool>,
    outstanding: watch::Sender<usize>,
}

/// Bidirectional shutdown coordinator.
///
/// Workers call [`register`](Self::register) before starting, watch the
/// returned [`ShutdownSignal`], and hand back their [`Completion`] once
/// cleanup is done. The supervisor calls [`signal`](Self::signal) to begin
/// shutdown and [`join`](Self::join) to wait for every completion.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    inner: Arc<Inner>,
}

impl ShutdownCoordinator {
    /// Create a coordinator that is not signaled and has no participants.
    pub fn new() -> Self {
        let (signaled, _) = watch::channel(false);
        let (outstanding, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                signaled,
                outstanding,
            }),
        }
    }

    /// Register a participant.
    ///
    /// Returns a handle that resolves once shutdown is signaled and a
    /// completion that must be finished (or dropped) when the participant
    /// is done cleaning up. Registering after shutdown was signaled is
    /// allowed: the handle is already signaled, and the completion still
    /// has to be finished before joiners return.
    pub fn register(&self) -> (ShutdownSignal, Completion) {
        let signal = self.subscribe();

        let mut outstanding = 0;
        self.inner.outstanding.send_modify(|n| {
            *n += 1;
            outstanding = *n;
        });

        tracing::debug!(
            outstanding,
            signaled = signal.is_signaled(),
            "Participant registered"
        );

        (
            signal,
            Completion {
                inner: Arc::clone(&self.inner),
            },
        )
    }

    /// Observe the shutdown signal without registering as a participant.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.inner.signaled.subscribe(),
        }
    }

    /// Signal shutdown.
    ///
    /// Returns `true` if this call performed the transition and `false` if
    /// shutdown had already been signaled. Never waits for participants.
    pub fn signal(&self) -> bool {
        let transitioned = self.inner.signaled.send_if_modified(|signaled| {
            if *signaled {
                false
            } else {
                *signaled = true;
                true
            }
        });

        if transitioned {
            tracing::info!(outstanding = self.outstanding(), "Shutdown signaled");
        } else {
            tracing::debug!("Shutdown already signaled");
        }

        transitioned
    }

    /// Wait until every registered participant has finished.
    ///
    /// Does not signal shutdown. Returns immediately when nothing is
    /// registered. A registration that lands while a joiner is waiting
    /// keeps it waiting until that participant finishes too.
    pub async fn join(&self) {
        let mut rx = self.inner.outstanding.subscribe();
        // `self` keeps the sender alive, so this only returns once the
        // predicate holds.
        let _ = rx.wait_for(|outstanding| *outstanding == 0).await;
        tracing::debug!("Join complete");
    }

    /// Signal shutdown, then wait for every participant to finish.
    pub async fn signal_and_join(&self) {
        self.signal();
        self.join().await;
    }

    /// Wait for `event` or for shutdown to be signaled elsewhere, whichever
    /// comes first, then signal and join.
    ///
    /// `event` is any future standing in for an external trigger, such as
    /// the sources in [`crate::lifecycle::signals`].
    pub async fn signal_on<F>(&self, event: F)
    where
        F: Future<Output = ()>,
    {
        let mut signal = self.subscribe();

        tokio::select! {
            _ = event => {
                tracing::info!("External shutdown event received");
            }
            _ = signal.recv() => {
                tracing::info!("Shutdown signaled elsewhere");
            }
        }

        self.signal_and_join().await;
    }

    /// Like [`signal_on`](Self::signal_on), racing any number of events.
    ///
    /// With no events this waits only for shutdown to be signaled elsewhere.
    pub async fn signal_on_any<I, F>(&self, events: I)
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = ()>,
    {
        let events: Vec<_> = events.into_iter().map(Box::pin).collect();
        tracing::debug!(sources = events.len(), "Waiting for shutdown event");

        self.signal_on(async move {
            if events.is_empty() {
                std::future::pending::<()>().await;
            } else {
                let ((), index, _) = select_all(events).await;
                tracing::debug!(source = index, "Shutdown event source fired");
            }
        })
        .await;
    }

    /// Whether shutdown has been signaled.
    pub fn is_signaled(&self) -> bool {
        *self.inner.signaled.borrow()
    }

    /// Number of participants that registered but have not finished.
    pub fn outstanding(&self) -> usize {
        *self.inner.outstanding.borrow()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ShutdownState {
        match (self.is_signaled(), self.outstanding()) {
            (false, _) => ShutdownState::Idle,
            (true, 0) => ShutdownState::Quiesced,
            (true, _) => ShutdownState::ShuttingDown,
        }
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a coordinator's shutdown flag.
///
/// Once a coordinator and every clone of it are dropped, no signal can
/// arrive any more; the handle then reports shutdown as well.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Whether shutdown has been signaled. Never blocks.
    ///
    /// Also `true` once the coordinator and every clone of it are dropped,
    /// even if [`ShutdownCoordinator::signal`] was never called.
    pub fn is_signaled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolve once shutdown has been signaled.
    ///
    /// Resolves immediately if it already was. Also resolves once the
    /// coordinator and every clone of it are dropped without signaling,
    /// since no signal can arrive after that. Cancel safe.
    pub async fn recv(&mut self) {
        let _ = self.rx.wait_for(|signaled| *signaled).await;
        tracing::trace!("Shutdown observed");
    }
}

/// Report that a registered participant has finished its cleanup.
///
/// [`finish`](Self::finish) consumes the completion, so each registration
/// is counted out exactly once. Dropping an unfinished completion counts
/// the participant out as well.
#[derive(Debug)]
#[must_use = "dropping a Completion counts the participant as finished"]
pub struct Completion {
    inner: Arc<Inner>,
}

impl Completion {
    /// Mark this participant as finished.
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        let mut remaining = 0;
        self.inner.outstanding.send_modify(|n| {
            *n = n.saturating_sub(1);
            remaining = *n;
        });

        if remaining == 0 && *self.inner.signaled.borrow() {
            tracing::info!("All participants finished");
        } else {
            tracing::debug!(outstanding = remaining, "Participant finished");
        }
    }
}
