//! Selection engine
//!
//! Tracks a user's in-progress choice selections for one item edit and
//! decides whether the item is eligible to be committed to a cart.
//!
//! Selections live in a single category → set-of-keys mapping; "is this
//! choice selected" is always derived from set membership. Choices carry
//! no selection flag of their own.

use crate::error::{ModelError, ModelResult};
use crate::models::{ChoiceKey, ItemChoice, MenuItem};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// Per-category policy, read off the item's declared choices.
/// Choices within one category share a required flag and limit.
#[derive(Debug, Clone, Copy)]
struct CategoryPolicy {
    required: bool,
    limit: u32,
}

/// In-progress selections for one item edit.
///
/// Created fresh when the detail flow opens (pre-seeded from the line's
/// committed choices when editing an existing line) and discarded when the
/// flow closes.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    selected: HashMap<String, HashSet<ChoiceKey>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an item's committed choices (editing an existing line)
    pub fn from_committed(item: &MenuItem) -> Self {
        let mut state = Self::new();
        for choice in &item.selected_choices {
            state
                .selected
                .entry(choice.category.clone())
                .or_default()
                .insert(choice.key());
        }
        state
    }

    fn policy(item: &MenuItem, category: &str) -> Option<CategoryPolicy> {
        item.choices
            .iter()
            .find(|c| c.category == category)
            .map(|c| CategoryPolicy {
                required: c.required,
                limit: c.limit,
            })
    }

    /// Select a choice.
    ///
    /// Returns `Ok(true)` when applied, `Ok(false)` when the category is
    /// already at its limit (the selection does not apply; callers surface
    /// a transient notice, not an error). Selecting a choice the item does
    /// not declare is an error.
    pub fn select(&mut self, item: &MenuItem, choice: &ItemChoice) -> ModelResult<bool> {
        if !item.choices.contains(choice) {
            return Err(ModelError::UnknownChoice {
                name: choice.name.clone(),
                category: choice.category.clone(),
            });
        }
        let set = self.selected.entry(choice.category.clone()).or_default();
        if set.contains(&choice.key()) {
            return Ok(true);
        }
        if set.len() as u32 >= choice.limit {
            tracing::debug!(
                item_id = %item.id,
                category = %choice.category,
                limit = choice.limit,
                "selection limit reached, choice rejected"
            );
            return Ok(false);
        }
        set.insert(choice.key());
        Ok(true)
    }

    /// Deselect a choice; returns whether it was selected
    pub fn deselect(&mut self, choice: &ItemChoice) -> bool {
        self.selected
            .get_mut(&choice.category)
            .map(|set| set.remove(&choice.key()))
            .unwrap_or(false)
    }

    /// Toggle a choice; returns the resulting selected state
    pub fn toggle(&mut self, item: &MenuItem, choice: &ItemChoice) -> ModelResult<bool> {
        if self.is_selected(choice) {
            self.deselect(choice);
            Ok(false)
        } else {
            self.select(item, choice)
        }
    }

    pub fn is_selected(&self, choice: &ItemChoice) -> bool {
        self.selected
            .get(&choice.category)
            .is_some_and(|set| set.contains(&choice.key()))
    }

    pub fn selected_count(&self, category: &str) -> usize {
        self.selected.get(category).map_or(0, |set| set.len())
    }

    /// Resolve the selected keys back to the item's declared choices,
    /// for committing onto a cart line
    pub fn selected_choices(&self, item: &MenuItem) -> Vec<ItemChoice> {
        item.choices
            .iter()
            .filter(|c| self.is_selected(c))
            .cloned()
            .collect()
    }

    /// Sum of the selected choices' price deltas
    pub fn delta_total(&self, item: &MenuItem) -> Decimal {
        self.selected_choices(item)
            .iter()
            .map(|c| c.price_delta)
            .sum()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Decide whether `item` is eligible for cart submission.
    ///
    /// - No declared choices: eligible iff quantity > 0.
    /// - Quantity must be strictly positive.
    /// - A required category with no selections is unsatisfied.
    /// - A required category with selections must hit its limit exactly;
    ///   selecting fewer than `limit` is not enough (all-or-nothing).
    /// - An optional category may have at most `limit` selections.
    ///
    /// Evaluation only; nothing is mutated or clamped here.
    pub fn requirements_satisfied(&self, item: &MenuItem) -> bool {
        if item.quantity() == 0 {
            return false;
        }
        if item.choices.is_empty() {
            return true;
        }

        for category in item.choice_categories() {
            let Some(policy) = Self::policy(item, category) else {
                continue;
            };
            let count = self.selected_count(category) as u32;

            if policy.required {
                if count != policy.limit {
                    return false;
                }
            } else if count > policy.limit {
                return false;
            }
        }
        true
    }
}
