//! Store menu model

use super::item::MenuItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Section ordering for partitioned display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// The catalog for one service type at one store
/// (e.g. "Washing", "Dry Cleaning").
///
/// Lives for the duration of a store-detail session. Partitioning is
/// computed on demand and must be re-requested after a bulk [`clear`];
/// it does not auto-invalidate.
///
/// [`clear`]: StoreMenu::clear
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMenu {
    /// Menu identifier (line identity on items references this)
    pub id: String,
    /// Service label (e.g. "Washing")
    pub label: String,
    pub items: Vec<MenuItem>,
}

impl StoreMenu {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<MenuItem>) -> Self {
        self.items = items;
        self
    }

    /// Group items by category, each group sorted alphabetically by name.
    ///
    /// BTreeMap keys give the ascending section order for free; an empty
    /// menu yields an empty map (absent service type, not an error).
    pub fn partition(&self) -> BTreeMap<String, Vec<MenuItem>> {
        let mut sections: BTreeMap<String, Vec<MenuItem>> = BTreeMap::new();
        for item in &self.items {
            sections
                .entry(item.category.clone())
                .or_default()
                .push(item.clone());
        }
        for group in sections.values_mut() {
            group.sort_by(|a, b| a.name.cmp(&b.name));
        }
        sections
    }

    /// Category names in the requested display order
    pub fn section_names(&self, direction: SortDirection) -> Vec<String> {
        let mut names: Vec<String> = self.partition().into_keys().collect();
        if direction == SortDirection::Descending {
            names.reverse();
        }
        names
    }

    /// Zero every item's quantity without removing items.
    ///
    /// Used when a cart is erased. Callers must re-partition afterwards
    /// if they hold a partition snapshot.
    pub fn clear(&mut self) {
        for item in &mut self.items {
            item.set_quantity(0);
        }
    }

    /// Sum of quantities across all items
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity()).sum()
    }
}
