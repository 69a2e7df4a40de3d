//! Connectivity monitoring
//!
//! Publishes the current connectivity status on a watch channel. A monitor
//! task drives the channel from a probe on a fixed interval; tests and
//! manual integrations can drive the channel directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

/// Connectivity status as exposed by the platform path monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectivityStatus {
    /// Network is usable
    Satisfied,
    /// Network is down
    Unsatisfied,
    /// A connection (e.g. VPN, captive portal) must be established first
    RequiresConnection,
}

impl ConnectivityStatus {
    pub fn is_satisfied(&self) -> bool {
        *self == ConnectivityStatus::Satisfied
    }
}

/// Probe answering "is the network usable right now"
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn check(&self) -> ConnectivityStatus;
}

/// Create a connectivity channel with an initial status.
///
/// The sender side belongs to whoever drives status (a monitor task or a
/// test); receivers are handed to sync workers.
pub fn channel(
    initial: ConnectivityStatus,
) -> (
    watch::Sender<ConnectivityStatus>,
    watch::Receiver<ConnectivityStatus>,
) {
    watch::channel(initial)
}

/// Connectivity monitor
///
/// Periodically probes and publishes status changes, counting consecutive
/// failures for log context.
pub struct ConnectivityMonitor {
    probe: Arc<dyn ConnectivityProbe>,
    probe_interval: Duration,
    tx: watch::Sender<ConnectivityStatus>,
}

impl ConnectivityMonitor {
    pub fn new(
        probe: Arc<dyn ConnectivityProbe>,
        probe_interval: Duration,
        tx: watch::Sender<ConnectivityStatus>,
    ) -> Self {
        Self {
            probe,
            probe_interval,
            tx,
        }
    }

    /// Run the probe loop until `shutdown` fires
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = interval(self.probe_interval);
        let mut consecutive_failures = 0u32;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("connectivity monitor stopped");
                    return;
                }
                _ = ticker.tick() => {}
            }

            let status = self.probe.check().await;
            if status.is_satisfied() {
                if consecutive_failures > 0 {
                    tracing::info!(consecutive_failures, "connectivity restored");
                }
                consecutive_failures = 0;
            } else {
                consecutive_failures += 1;
                tracing::warn!(?status, consecutive_failures, "connectivity lost");
            }

            // send_if_modified keeps receivers from waking on every tick
            self.tx.send_if_modified(|current| {
                if *current != status {
                    *current = status;
                    true
                } else {
                    false
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlappingProbe {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ConnectivityProbe for FlappingProbe {
        async fn check(&self) -> ConnectivityStatus {
            // down on the first probe, up afterwards
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                ConnectivityStatus::Unsatisfied
            } else {
                ConnectivityStatus::Satisfied
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_monitor_publishes_status_changes() {
        let (tx, mut rx) = channel(ConnectivityStatus::Satisfied);
        let monitor = ConnectivityMonitor::new(
            Arc::new(FlappingProbe {
                calls: AtomicUsize::new(0),
            }),
            Duration::from_secs(5),
            tx,
        );
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(monitor.run(shutdown.clone()));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ConnectivityStatus::Unsatisfied);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ConnectivityStatus::Satisfied);

        shutdown.cancel();
        handle.await.unwrap();
    }
}
