//! Cart snapshot - serializable state for persistence and refresh

use crate::models::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time copy of a cart, suitable for pushing to a remote store
/// and for superseding local state on refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub cart_id: String,
    pub store_id: String,
    pub user_id: String,
    pub lines: Vec<MenuItem>,
    /// Subtotal at snapshot time; the live cart never stores this
    pub subtotal: Decimal,
    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity()).sum()
    }
}
