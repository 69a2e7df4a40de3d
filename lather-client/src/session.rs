//! Store-detail session
//!
//! One `StoreSession` per opened store: it owns the shared cart, the
//! fetched menu, the sync worker and the staged-erase state. The cart is
//! shared by reference with item-detail flows; every mutation goes through
//! the session so it can mark the cart dirty for sync.

use crate::config::SessionConfig;
use crate::connectivity::ConnectivityStatus;
use crate::error::{ClientError, ClientResult};
use crate::sync::{CartSyncWorker, SyncHandle};
use crate::traits::{CartStore, MenuSource};
use shared::cart::{Cart, CartObserver};
use shared::models::{LineKey, MenuItem, Store, StoreMenu};
use shared::selection::SelectionState;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

/// One store's ordering session (cart + menu + sync + staged erase)
pub struct StoreSession {
    pub store: Store,
    user_id: String,
    cart: Arc<RwLock<Cart>>,
    menu: Arc<RwLock<Option<StoreMenu>>>,
    menu_source: Arc<dyn MenuSource>,
    cart_store: Arc<dyn CartStore>,
    config: SessionConfig,
    /// Token of the pending staged erase, if any; the erase task clears
    /// the slot when it resolves either way
    staged_erase: Arc<Mutex<Option<CancellationToken>>>,
    sync: SyncHandle,
    shutdown: CancellationToken,
}

impl StoreSession {
    /// Open a session: fetch the persisted cart if one exists (falling
    /// back to a fresh local cart when the store is unreachable) and start
    /// the sync worker.
    pub async fn open(
        store: Store,
        user_id: impl Into<String>,
        menu_source: Arc<dyn MenuSource>,
        cart_store: Arc<dyn CartStore>,
        connectivity: watch::Receiver<ConnectivityStatus>,
        config: SessionConfig,
    ) -> Self {
        let user_id = user_id.into();

        let cart = match cart_store.fetch(&store.id, &user_id).await {
            Ok(Some(snapshot)) => {
                tracing::debug!(store_id = %store.id, "restored persisted cart");
                Cart::from_snapshot(snapshot)
            }
            Ok(None) => Cart::new(store.id.clone(), user_id.clone()),
            Err(err) => {
                // local-only until connectivity; the worker reconciles later
                tracing::warn!(store_id = %store.id, %err, "cart fetch failed, starting local-only");
                Cart::new(store.id.clone(), user_id.clone())
            }
        };
        let cart = Arc::new(RwLock::new(cart));

        let (worker, sync) = CartSyncWorker::new(
            cart.clone(),
            cart_store.clone(),
            connectivity,
            config.sync_retry_interval,
        );
        let shutdown = CancellationToken::new();
        tokio::spawn(worker.run(shutdown.clone()));

        Self {
            store,
            user_id,
            cart,
            menu: Arc::new(RwLock::new(None)),
            menu_source,
            cart_store,
            config,
            staged_erase: Arc::new(Mutex::new(None)),
            sync,
            shutdown,
        }
    }

    /// Fetch and install the menu for `menu_id`.
    ///
    /// Returns `Ok(false)` when the store has no menu of that id — the
    /// service type is unavailable here, which is not an error.
    pub async fn load_menu(&self, menu_id: &str) -> ClientResult<bool> {
        let fetched = self.menu_source.fetch_menu(menu_id).await?;
        let present = fetched.is_some();
        *self.menu.write().await = fetched;
        Ok(present)
    }

    /// The shared cart. Item-detail flows hold this same instance; their
    /// mutations are immediately visible here.
    pub fn cart(&self) -> Arc<RwLock<Cart>> {
        self.cart.clone()
    }

    pub fn menu(&self) -> Arc<RwLock<Option<StoreMenu>>> {
        self.menu.clone()
    }

    pub async fn subscribe_cart(&self, observer: Arc<dyn CartObserver>) {
        self.cart.write().await.subscribe(observer);
    }

    /// Commit an edited item copy to the cart.
    ///
    /// Eligibility is checked against the in-progress selections; an
    /// ineligible item is rejected (`false`) and the cart is untouched.
    pub async fn commit_item(&self, mut draft: MenuItem, selection: &SelectionState) -> bool {
        if !selection.requirements_satisfied(&draft) {
            tracing::debug!(item_id = %draft.id, "item not eligible for cart, commit rejected");
            return false;
        }
        draft.selected_choices = selection.selected_choices(&draft);
        self.cart.write().await.add_item(draft);
        self.sync.mark_dirty();
        true
    }

    /// Replace a cart line with an edited copy (quantity zero removes it)
    pub async fn update_line(&self, item: MenuItem) {
        self.cart.write().await.update_item(item);
        self.sync.mark_dirty();
    }

    /// Remove units from a line; the line disappears with its last unit
    pub async fn remove_units(&self, key: &LineKey, count: u32) {
        self.cart.write().await.remove_units(key, count);
        self.sync.mark_dirty();
    }

    pub async fn subtotal(&self) -> Decimal {
        self.cart.read().await.subtotal()
    }

    pub async fn total_quantity(&self) -> u32 {
        self.cart.read().await.total_quantity()
    }

    /// Supersede the local cart with the remote copy, when one exists
    pub async fn refresh(&self) -> ClientResult<()> {
        if let Some(snapshot) = self.cart_store.fetch(&self.store.id, &self.user_id).await? {
            self.cart.write().await.apply_snapshot(snapshot);
            tracing::debug!(store_id = %self.store.id, "local cart superseded by remote copy");
        }
        Ok(())
    }

    /// Stage a cart erase behind the undo window.
    ///
    /// The erase finalizes (menu quantities zeroed, cart emptied, remote
    /// cart deleted) only after the window elapses without a
    /// [`cancel_erase`] call. At most one erase may be staged at a time.
    ///
    /// [`cancel_erase`]: StoreSession::cancel_erase
    pub async fn stage_erase(&self) -> ClientResult<()> {
        let mut slot = self.staged_erase.lock().await;
        if slot.is_some() {
            return Err(ClientError::EraseAlreadyStaged);
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        drop(slot);

        let cart = self.cart.clone();
        let menu = self.menu.clone();
        let cart_store = self.cart_store.clone();
        let slot = self.staged_erase.clone();
        let sync = self.sync.clone();
        let window = self.config.erase_undo_window;
        let store_id = self.store.id.clone();
        let user_id = self.user_id.clone();

        tracing::info!(store_id = %store_id, window_ms = window.as_millis() as u64, "cart erase staged");
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!(store_id = %store_id, "staged erase canceled");
                }
                _ = tokio::time::sleep(window) => {
                    cart.write().await.clear();
                    if let Some(menu) = menu.write().await.as_mut() {
                        menu.clear();
                    }
                    if let Err(err) = cart_store.delete(&store_id, &user_id).await {
                        // deferred retry: the worker sees an empty cart and deletes
                        tracing::warn!(store_id = %store_id, %err, "remote cart delete failed, deferred");
                        sync.mark_dirty();
                    }
                    tracing::info!(store_id = %store_id, "cart erase finalized");
                }
            }
            *slot.lock().await = None;
        });
        Ok(())
    }

    /// Cancel a pending staged erase; returns whether one was pending
    pub async fn cancel_erase(&self) -> bool {
        let slot = self.staged_erase.lock().await;
        match slot.as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    pub async fn erase_pending(&self) -> bool {
        self.staged_erase.lock().await.is_some()
    }

    /// Stop the session's background tasks
    pub fn close(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for StoreSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
