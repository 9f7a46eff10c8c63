//! # Cart Types
//!
//! The cart as the checkout boundary sees it: line items carrying the
//! category ids of their products. The engine only ever needs the
//! deduplicated union of those categories.

use crate::rule::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A line item in the active cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product ID
    pub product_id: String,

    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Category ids the product belongs to
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Create a line item with its product categories
    pub fn new(
        product_id: impl Into<String>,
        quantity: u32,
        categories: impl IntoIterator<Item = CategoryId>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            categories: categories.into_iter().collect(),
        }
    }
}

/// The active shopping cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Builder: add a line item
    pub fn with_item(mut self, item: CartItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all line items
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Deduplicated set of category ids across all line items
    pub fn categories(&self) -> HashSet<CategoryId> {
        self.items
            .iter()
            .flat_map(|item| item.categories.iter().cloned())
            .collect()
    }
}

/// The platform cart collaborator.
///
/// `None` means there is no active cart or session. That is not an error: the
/// gateway filter treats it as "no restriction applies" and passes the
/// gateway list through unchanged. Implementations must be side-effect free.
pub trait CartProvider: Send + Sync {
    fn cart_categories(&self) -> Option<HashSet<CategoryId>>;
}

impl CartProvider for Cart {
    fn cart_categories(&self) -> Option<HashSet<CategoryId>> {
        Some(self.categories())
    }
}
