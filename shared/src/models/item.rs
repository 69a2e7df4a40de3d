//! Menu item model

use super::choice::ItemChoice;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound for a single line's quantity
pub const MAX_QUANTITY: u32 = 100;

/// Upper bound for special-instructions length (characters)
pub const MAX_INSTRUCTIONS_LEN: usize = 100;

/// One purchasable product variant inside a store menu.
///
/// The detail/edit flow works on a clone and commits it through the cart,
/// so an abandoned edit never touches the menu's copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable identifier within the owning menu
    pub id: String,
    pub name: String,
    /// Category tag (e.g. "Shirts", "Bedding")
    pub category: String,
    /// Unit price before choice deltas
    pub unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// Choice groups offered for this item
    pub choices: Vec<ItemChoice>,
    /// Owning menu's identifier (replaces the object back-reference;
    /// only ever used for line identity)
    pub menu_id: String,
    quantity: u32,
    special_instructions: String,
    /// Choices the user had selected when this item was committed to a
    /// cart. Empty while the item sits in a menu.
    #[serde(default)]
    pub selected_choices: Vec<ItemChoice>,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit_price: Decimal,
        menu_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit_price,
            photo: None,
            choices: Vec::new(),
            menu_id: menu_id.into(),
            quantity: 0,
            special_instructions: String::new(),
            selected_choices: Vec::new(),
        }
    }

    pub fn with_choices(mut self, choices: Vec<ItemChoice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the quantity, clamped to [0, MAX_QUANTITY]
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.min(MAX_QUANTITY);
    }

    /// Increment by `by`, saturating at MAX_QUANTITY
    pub fn increment(&mut self, by: u32) {
        self.quantity = self.quantity.saturating_add(by).min(MAX_QUANTITY);
    }

    /// Decrement by `by`, saturating at 0
    pub fn decrement(&mut self, by: u32) {
        self.quantity = self.quantity.saturating_sub(by);
    }

    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    /// Replace the special instructions.
    ///
    /// Over-length text is rejected (the previous value is kept) and
    /// `false` is returned; presentation decides how to surface that.
    pub fn set_special_instructions(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.chars().count() > MAX_INSTRUCTIONS_LEN {
            tracing::debug!(
                item_id = %self.id,
                len = text.chars().count(),
                "special instructions over length, rejected"
            );
            return false;
        }
        self.special_instructions = text;
        true
    }

    /// Line identity for cart deduplication
    pub fn line_key(&self) -> LineKey {
        LineKey {
            item_id: self.id.clone(),
            category: self.category.clone(),
            menu_id: self.menu_id.clone(),
        }
    }

    /// Unit price including the committed choice deltas
    pub fn effective_unit_price(&self) -> Decimal {
        self.unit_price
            + self
                .selected_choices
                .iter()
                .map(|c| c.price_delta)
                .sum::<Decimal>()
    }

    /// Contribution of this line to a cart subtotal
    pub fn line_total(&self) -> Decimal {
        self.effective_unit_price() * Decimal::from(self.quantity)
    }

    /// Distinct choice categories declared on this item, in first-seen order
    pub fn choice_categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for choice in &self.choices {
            if !seen.contains(&choice.category.as_str()) {
                seen.push(choice.category.as_str());
            }
        }
        seen
    }
}

/// Two items represent the same cart line iff these three match,
/// regardless of quantity or instructions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub item_id: String,
    pub category: String,
    pub menu_id: String,
}
