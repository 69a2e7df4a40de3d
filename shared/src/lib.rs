//! Shared types for the Lather ordering core
//!
//! Domain model used across crates: stores, menus, items, choice groups,
//! carts, cart events and the selection engine. Pure data and logic —
//! no I/O and no async in this crate.

pub mod cart;
pub mod error;
pub mod models;
pub mod money;
pub mod selection;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Model re-exports (for convenient access)
pub use cart::{Cart, CartEvent, CartEventPayload, CartObserver, CartSnapshot};
pub use models::{ChoiceKey, ItemChoice, LineKey, MenuItem, SortDirection, Store, StoreMenu};
pub use selection::SelectionState;
