//! Item choice model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One selectable sub-option within a choice category
/// (e.g. "Starch: Light/Medium/Heavy").
///
/// Equality and hashing use (name, category) only: price, `required` and
/// `limit` are group policy, not identity. Selection state is never stored
/// here — see [`crate::selection::SelectionState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemChoice {
    pub name: String,
    /// Category tag grouping related choices (e.g. "Size")
    pub category: String,
    /// Price delta applied on top of the item's unit price when selected
    pub price_delta: Decimal,
    /// Whether the category this choice belongs to must be satisfied
    /// before the item may be committed to a cart
    pub required: bool,
    /// Max simultaneous selections allowed within this category
    pub limit: u32,
}

impl ItemChoice {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price_delta: Decimal,
        required: bool,
        limit: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price_delta,
            required,
            limit,
        }
    }

    /// Identity key for set-based selection tracking
    pub fn key(&self) -> ChoiceKey {
        ChoiceKey {
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

impl PartialEq for ItemChoice {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category == other.category
    }
}

impl Eq for ItemChoice {}

impl Hash for ItemChoice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.category.hash(state);
    }
}

/// Identity of a choice: (name, category)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChoiceKey {
    pub name: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    #[test]
    fn test_choice_identity_ignores_price_and_policy() {
        let a = ItemChoice::new("Heavy", "Starch", dec!(0.50), false, 1);
        let b = ItemChoice::new("Heavy", "Starch", dec!(9.99), true, 3);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_choice_distinct_by_category() {
        let a = ItemChoice::new("Heavy", "Starch", dec!(0.50), false, 1);
        let b = ItemChoice::new("Heavy", "Detergent", dec!(0.50), false, 1);
        assert_ne!(a, b);
    }
}
