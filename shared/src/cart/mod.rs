//! Cart - the mutable order-in-progress for one (user, store) pair
//!
//! Lines are deduplicated by [`LineKey`]; the subtotal is always computed
//! from the lines, never stored. Every mutating call emits exactly one
//! [`CartEvent`] to the registered observers, synchronously.

mod event;
mod snapshot;

pub use event::{CartEvent, CartEventPayload, CartObserver};
pub use snapshot::CartSnapshot;

use crate::models::{LineKey, MenuItem};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Order in progress for one store.
///
/// Shared by reference between the store-detail flow and its item-detail
/// children; mutation is immediately visible to every holder. Single
/// writer context by construction (the session layer serializes access).
pub struct Cart {
    pub id: String,
    pub store_id: String,
    pub user_id: String,
    lines: Vec<MenuItem>,
    observers: Vec<Arc<dyn CartObserver>>,
}

impl std::fmt::Debug for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cart")
            .field("id", &self.id)
            .field("store_id", &self.store_id)
            .field("user_id", &self.user_id)
            .field("lines", &self.lines.len())
            .finish()
    }
}

impl Cart {
    /// Create an empty cart for a (store, user) pair
    pub fn new(store_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            store_id: store_id.into(),
            user_id: user_id.into(),
            lines: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Rebuild a cart from a persisted snapshot (remote copy supersedes
    /// local state on refresh). Observers are not part of a snapshot.
    pub fn from_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            id: snapshot.cart_id,
            store_id: snapshot.store_id,
            user_id: snapshot.user_id,
            lines: snapshot
                .lines
                .into_iter()
                .filter(|l| l.quantity() > 0)
                .collect(),
            observers: Vec::new(),
        }
    }

    /// Adopt a remote snapshot in place, superseding local lines.
    ///
    /// Observers are kept. No event is emitted; a refresh is not a user
    /// mutation.
    pub fn apply_snapshot(&mut self, snapshot: CartSnapshot) {
        self.id = snapshot.cart_id;
        self.store_id = snapshot.store_id;
        self.user_id = snapshot.user_id;
        self.lines = snapshot
            .lines
            .into_iter()
            .filter(|l| l.quantity() > 0)
            .collect();
    }

    pub fn subscribe(&mut self, observer: Arc<dyn CartObserver>) {
        self.observers.push(observer);
    }

    fn notify(&self, payload: CartEventPayload) {
        let event = CartEvent::new(self.id.clone(), payload);
        for observer in &self.observers {
            observer.on_cart_event(&event);
        }
    }

    /// Insert a new line or merge into the matching one.
    ///
    /// On merge the quantities are added (clamped at the line maximum) and
    /// the incoming item's selected choices and special instructions
    /// overwrite the existing line's. An incoming quantity of zero is a
    /// no-op and emits nothing.
    pub fn add_item(&mut self, item: MenuItem) {
        if item.quantity() == 0 {
            tracing::debug!(cart_id = %self.id, item_id = %item.id, "zero-quantity add ignored");
            return;
        }
        let key = item.line_key();
        if let Some(line) = self.lines.iter_mut().find(|l| l.line_key() == key) {
            line.increment(item.quantity());
            if !line.set_special_instructions(item.special_instructions()) {
                tracing::warn!(cart_id = %self.id, line = ?key, "incoming instructions over length, kept previous");
            }
            line.selected_choices = item.selected_choices;
            let quantity = line.quantity();
            tracing::debug!(cart_id = %self.id, line = ?key, quantity, "line merged");
            self.notify(CartEventPayload::ItemAdded {
                line: key,
                quantity,
            });
        } else {
            let quantity = item.quantity();
            self.lines.push(item);
            tracing::debug!(cart_id = %self.id, line = ?key, quantity, "line inserted");
            self.notify(CartEventPayload::ItemAdded {
                line: key,
                quantity,
            });
        }
    }

    /// Replace the matching line with `item`.
    ///
    /// A replacement quantity of zero removes the line instead. Absence of
    /// a match is a no-op, not an error.
    pub fn update_item(&mut self, item: MenuItem) {
        let key = item.line_key();
        let Some(idx) = self.lines.iter().position(|l| l.line_key() == key) else {
            tracing::debug!(cart_id = %self.id, line = ?key, "update for absent line ignored");
            return;
        };
        if item.quantity() == 0 {
            self.lines.remove(idx);
            self.notify(CartEventPayload::ItemRemoved { line: key });
            return;
        }
        let quantity = item.quantity();
        self.lines[idx] = item;
        self.notify(CartEventPayload::ItemUpdated {
            line: key,
            quantity,
        });
    }

    /// Decrement the matching line by `count` units; removing the last
    /// unit removes the line entirely.
    pub fn remove_units(&mut self, key: &LineKey, count: u32) {
        let Some(idx) = self.lines.iter().position(|l| l.line_key() == *key) else {
            return;
        };
        self.lines[idx].decrement(count);
        if self.lines[idx].quantity() == 0 {
            self.lines.remove(idx);
            self.notify(CartEventPayload::ItemRemoved { line: key.clone() });
        } else {
            let quantity = self.lines[idx].quantity();
            self.notify(CartEventPayload::ItemUpdated {
                line: key.clone(),
                quantity,
            });
        }
    }

    /// Remove the matching line outright
    pub fn remove_line(&mut self, key: &LineKey) {
        let Some(idx) = self.lines.iter().position(|l| l.line_key() == *key) else {
            return;
        };
        self.lines.remove(idx);
        self.notify(CartEventPayload::ItemRemoved { line: key.clone() });
    }

    /// Empty the cart (finalized erase)
    pub fn clear(&mut self) {
        self.lines.clear();
        self.notify(CartEventPayload::Cleared);
    }

    /// Quantity of the line matching `item`, or 0 when absent.
    ///
    /// Drives UI affordances (badge show/hide) without duplicating the
    /// merge rules at call sites.
    pub fn quantity_of(&self, item: &MenuItem) -> u32 {
        let key = item.line_key();
        self.lines
            .iter()
            .find(|l| l.line_key() == key)
            .map(|l| l.quantity())
            .unwrap_or(0)
    }

    /// Sum of quantities across all lines
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity()).sum()
    }

    /// Σ (unit price + Σ selected choice deltas) × quantity, recomputed
    /// on every call
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// An empty cart is semantically "no cart" and eligible for deletion
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[MenuItem] {
        &self.lines
    }

    /// Serializable copy for persistence
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart_id: self.id.clone(),
            store_id: self.store_id.clone(),
            user_id: self.user_id.clone(),
            lines: self.lines.clone(),
            subtotal: self.subtotal(),
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}
