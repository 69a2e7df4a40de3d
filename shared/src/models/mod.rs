//! Domain models

mod choice;
mod item;
mod menu;
mod store;

pub use choice::{ChoiceKey, ItemChoice};
pub use item::{LineKey, MenuItem, MAX_INSTRUCTIONS_LEN, MAX_QUANTITY};
pub use menu::{SortDirection, StoreMenu};
pub use store::{GeoPoint, Store};
