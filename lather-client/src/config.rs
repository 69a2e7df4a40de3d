//! Session configuration

use std::time::Duration;

/// Tuning knobs for a store-detail session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// User-facing undo window before a staged cart erase is finalized
    pub erase_undo_window: Duration,

    /// Delay between retries when a cart push fails with connectivity up
    pub sync_retry_interval: Duration,

    /// Connectivity probe interval for the monitor task
    pub probe_interval: Duration,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            erase_undo_window: Duration::from_secs(2),
            sync_retry_interval: Duration::from_secs(5),
            probe_interval: Duration::from_secs(5),
        }
    }

    /// Set the erase undo window
    pub fn with_erase_undo_window(mut self, window: Duration) -> Self {
        self.erase_undo_window = window;
        self
    }

    /// Set the sync retry interval
    pub fn with_sync_retry_interval(mut self, interval: Duration) -> Self {
        self.sync_retry_interval = interval;
        self
    }

    /// Set the connectivity probe interval
    pub fn with_probe_interval(mut self, interval: Duration) -> Self {
        self.probe_interval = interval;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
