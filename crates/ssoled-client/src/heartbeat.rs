//! Background keepalive for a GameSense registration.
//!
//! The server drops a game that stays silent for too long, so a session
//! keeps one task that posts `/game_heartbeat` and then waits `interval` or
//! until cancelled, whichever comes first.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::client::GameSenseClient;

/// Handles of the running keepalive task.
struct Running {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Periodic keepalive task. Owned by exactly one session.
pub struct Heartbeat {
    client: GameSenseClient,
    interval: Duration,
    running: Mutex<Option<Running>>,
    beats: Arc<AtomicU64>,
}

impl Heartbeat {
    /// Create a stopped heartbeat.
    pub fn new(client: GameSenseClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            running: Mutex::new(None),
            beats: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Interval between keepalives.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the keepalive task is live.
    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Number of keepalive requests issued so far, failed ones included.
    pub fn keepalive_count(&self) -> u64 {
        self.beats.load(Ordering::Relaxed)
    }

    /// Spawn the keepalive task on the current tokio runtime.
    ///
    /// Returns `false` (and logs a warning) if it is already running.
    pub fn start(&self) -> bool {
        let mut running = self.running.lock();
        if running.is_some() {
            warn!("heartbeat is already running");
            return false;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_heartbeat(
            self.client.clone(),
            self.interval,
            cancel.clone(),
            Arc::clone(&self.beats),
        ));
        *running = Some(Running { cancel, handle });
        debug!(interval = ?self.interval, "heartbeat started");
        true
    }

    /// Signal the keepalive task to stop.
    ///
    /// With `block` the task has fully exited when this returns; without it
    /// the task winds down in the background. Returns `false` if nothing
    /// was running.
    pub async fn stop(&self, block: bool) -> bool {
        let Some(Running { cancel, handle }) = self.running.lock().take() else {
            warn!("heartbeat is not running");
            return false;
        };

        cancel.cancel();
        if block {
            if let Err(e) = handle.await {
                warn!(error = %e, "heartbeat task ended abnormally");
            }
        }
        debug!(block, "heartbeat stopped");
        true
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        if let Some(running) = self.running.get_mut().take() {
            running.cancel.cancel();
        }
    }
}

/// Keepalive loop: beat, then wait `interval` or until cancelled.
///
/// A failed beat is logged and retried on the next tick; only cancellation
/// ends the loop.
async fn run_heartbeat(
    client: GameSenseClient,
    interval: Duration,
    cancel: CancellationToken,
    beats: Arc<AtomicU64>,
) {
    loop {
        let _ = beats.fetch_add(1, Ordering::Relaxed);
        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            result = client.heartbeat() => match result {
                Ok(true) => debug!("heartbeat acknowledged"),
                Ok(false) => warn!("heartbeat rejected by server"),
                Err(e) => warn!(error = %e, "heartbeat failed"),
            },
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(interval) => {}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
