//! Opportunistic cart persistence
//!
//! Cart mutations mark the session dirty; the sync worker pushes the
//! current snapshot whenever connectivity is satisfied and defers the push
//! otherwise. Connectivity loss is a retry condition, never an error
//! surfaced to the model.

use crate::connectivity::ConnectivityStatus;
use crate::traits::CartStore;
use shared::cart::Cart;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify, RwLock};
use tokio_util::sync::CancellationToken;

/// Handle for signaling "the cart changed, push when you can"
#[derive(Clone)]
pub struct SyncHandle {
    dirty: Arc<Notify>,
}

impl SyncHandle {
    pub fn mark_dirty(&self) {
        self.dirty.notify_one();
    }
}

/// Background worker pushing cart snapshots through a [`CartStore`]
pub struct CartSyncWorker {
    cart: Arc<RwLock<Cart>>,
    store: Arc<dyn CartStore>,
    connectivity: watch::Receiver<ConnectivityStatus>,
    dirty: Arc<Notify>,
    retry_interval: Duration,
}

impl CartSyncWorker {
    pub fn new(
        cart: Arc<RwLock<Cart>>,
        store: Arc<dyn CartStore>,
        connectivity: watch::Receiver<ConnectivityStatus>,
        retry_interval: Duration,
    ) -> (Self, SyncHandle) {
        let dirty = Arc::new(Notify::new());
        let handle = SyncHandle {
            dirty: dirty.clone(),
        };
        (
            Self {
                cart,
                store,
                connectivity,
                dirty,
                retry_interval,
            },
            handle,
        )
    }

    /// Run until `shutdown` fires
    pub async fn run(mut self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = self.dirty.notified() => {}
            }
            self.push_until_done(&shutdown).await;
        }
    }

    async fn push_until_done(&mut self, shutdown: &CancellationToken) {
        loop {
            // gate on connectivity; a status change re-wakes us
            while !self.connectivity.borrow().is_satisfied() {
                tracing::debug!("cart push deferred until connectivity returns");
                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    changed = self.connectivity.changed() => {
                        if changed.is_err() {
                            return;
                        }
                    }
                }
            }

            let snapshot = self.cart.read().await.snapshot();
            // an empty cart is "no cart": delete the remote copy
            let result = if snapshot.is_empty() {
                self.store
                    .delete(&snapshot.store_id, &snapshot.user_id)
                    .await
            } else {
                self.store.push(&snapshot).await
            };

            match result {
                Ok(()) => {
                    tracing::debug!(
                        cart_id = %snapshot.cart_id,
                        lines = snapshot.lines.len(),
                        "cart synced"
                    );
                    return;
                }
                Err(err) => {
                    tracing::warn!(cart_id = %snapshot.cart_id, %err, "cart push failed, will retry");
                    tokio::select! {
                        _ = shutdown.cancelled() => return,
                        _ = tokio::time::sleep(self.retry_interval) => {}
                    }
                }
            }
        }
    }
}
