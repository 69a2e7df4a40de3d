//! Cart events - records emitted after every cart mutation

use crate::models::LineKey;
use serde::{Deserialize, Serialize};

/// Cart change notification.
///
/// Exactly one event is emitted per mutating cart call, synchronously on
/// the calling context; no batching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEvent {
    /// Event unique ID
    pub event_id: String,
    /// Cart this event belongs to
    pub cart_id: String,
    /// Timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// What changed
    pub payload: CartEventPayload,
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEventPayload {
    /// A line was inserted, or an existing line's quantity increased
    ItemAdded {
        line: LineKey,
        /// Line quantity after the add
        quantity: u32,
    },
    /// An existing line was edited in place
    ItemUpdated {
        line: LineKey,
        quantity: u32,
    },
    /// A line left the cart (last unit removed, or removed outright)
    ItemRemoved {
        line: LineKey,
    },
    /// The cart was emptied (finalized erase)
    Cleared,
}

impl CartEvent {
    pub fn new(cart_id: impl Into<String>, payload: CartEventPayload) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            cart_id: cart_id.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }
}

/// Observer for cart changes.
///
/// The original delegate-callback surface; called synchronously from the
/// mutating call.
pub trait CartObserver: Send + Sync {
    fn on_cart_event(&self, event: &CartEvent);
}
