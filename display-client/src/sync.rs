//! Display synchronization loop
//!
//! A single task polls the cart API on a fixed cadence and forwards each
//! snapshot to the display:
//!
//! 1. fetch cart, forward it (or `None`)
//! 2. fetch payment status, forward it (or `None`)
//! 3. sleep `interval`, measured from the end of step 2
//!
//! Ticks never overlap. Fetch failures only affect the current tick; the loop
//! runs until [`SyncHandle::stop`] is called or the handle is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::display::{DisplaySink, Endpoint};
use crate::{CartSource, ClientResult};

/// Lifecycle state of the sync loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Running,
    Stopped,
}

/// Stopped sync loop, ready to be started
pub struct DisplaySync<S, D> {
    source: S,
    sink: D,
    interval: Duration,
}

impl<S, D> DisplaySync<S, D>
where
    S: CartSource + 'static,
    D: DisplaySink + 'static,
{
    pub fn new(source: S, sink: D, interval: Duration) -> Self {
        Self {
            source,
            sink,
            interval,
        }
    }

    /// Spawn the polling task on the current Tokio runtime
    ///
    /// The first tick starts immediately.
    pub fn start(self) -> SyncHandle {
        let shutdown = CancellationToken::new();
        let ticks = Arc::new(AtomicU64::new(0));

        let worker = SyncWorker {
            source: self.source,
            sink: self.sink,
            interval: self.interval,
            shutdown: shutdown.clone(),
            ticks: ticks.clone(),
            offline: false,
        };
        let task = tokio::spawn(worker.run());

        SyncHandle {
            shutdown,
            task: Some(task),
            ticks,
        }
    }
}

/// Owned handle to a running sync loop
///
/// Dropping the handle cancels the loop without waiting for it.
pub struct SyncHandle {
    shutdown: CancellationToken,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl SyncHandle {
    pub fn state(&self) -> SyncState {
        let finished = self.task.as_ref().is_none_or(|task| task.is_finished());
        if self.shutdown.is_cancelled() || finished {
            SyncState::Stopped
        } else {
            SyncState::Running
        }
    }

    /// Number of fully completed ticks
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Stop polling and wait for the task to exit
    ///
    /// Once this returns the display receives no further callbacks. An
    /// in-flight request is abandoned and its result discarded.
    pub async fn stop(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            if e.is_panic() {
                tracing::error!(error = %e, "Display sync task panicked");
            } else {
                tracing::warn!(error = %e, "Display sync task did not finish cleanly");
            }
        }
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct SyncWorker<S, D> {
    source: S,
    sink: D,
    interval: Duration,
    shutdown: CancellationToken,
    ticks: Arc<AtomicU64>,
    /// Both endpoints failed on the previous tick
    offline: bool,
}

impl<S, D> SyncWorker<S, D>
where
    S: CartSource,
    D: DisplaySink,
{
    async fn run(mut self) {
        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Display sync started");

        while self.tick().await.is_some() {
            self.ticks.fetch_add(1, Ordering::AcqRel);

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("Display sync stopped");
    }

    /// One poll of both endpoints; `None` once shutdown was requested
    async fn tick(&mut self) -> Option<()> {
        let cart = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return None,
            result = self.source.try_fetch_cart() => result,
        };
        let cart = self.settle(Endpoint::Cart, cart)?;
        let cart_ok = cart.is_some();
        self.sink.on_cart(cart);

        let status = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => return None,
            result = self.source.try_fetch_payment_status() => result,
        };
        let status = self.settle(Endpoint::PaymentStatus, status)?;
        let status_ok = status.is_some();
        self.sink.on_payment_status(status);

        self.track_connectivity(cart_ok || status_ok);
        Some(())
    }

    /// Turn a fetch result into the snapshot to forward
    ///
    /// Returns `None` when the loop was stopped meanwhile; nothing may reach
    /// the display after that.
    fn settle<T>(&mut self, endpoint: Endpoint, result: ClientResult<T>) -> Option<Option<T>> {
        if self.shutdown.is_cancelled() {
            return None;
        }

        match result {
            Ok(value) => Some(Some(value)),
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!(%endpoint, "Request timed out");
                } else {
                    tracing::warn!(%endpoint, error = %e, "Fetch failed");
                }
                self.sink.on_fetch_failed(endpoint, &e);
                Some(None)
            }
        }
    }

    fn track_connectivity(&mut self, reachable: bool) {
        match (self.offline, reachable) {
            (false, false) => {
                self.offline = true;
                tracing::warn!("POS API unreachable, display shows offline state");
            }
            (true, true) => {
                self.offline = false;
                tracing::info!("POS API reachable again");
            }
            _ => {}
        }
    }
}
