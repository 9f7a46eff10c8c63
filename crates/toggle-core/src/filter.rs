//! # Gateway Filter
//!
//! Boundary adapter between the live checkout flow and the rule matcher:
//! takes the platform's full gateway registry and removes every method the
//! matcher says to hide for the current cart.

use crate::gateway::GatewayRegistry;
use crate::matcher::compute_hidden_methods;
use crate::rule::{CategoryId, RuleSet};
use std::collections::HashSet;

/// Filter the available gateways for a cart.
///
/// `cart_categories` of `None` is the no-active-cart state and returns the
/// registry unchanged. Otherwise hidden gateways are removed; relative order
/// and identity of the remaining gateways are untouched. A hidden id that
/// was never in the registry is simply absent from the result, never an
/// error.
pub fn filter_available_gateways(
    all_gateways: &GatewayRegistry,
    cart_categories: Option<&HashSet<CategoryId>>,
    rules: &RuleSet,
) -> GatewayRegistry {
    let categories = match cart_categories {
        Some(categories) => categories,
        None => return all_gateways.clone(),
    };

    let hidden = compute_hidden_methods(categories, rules);
    if hidden.is_empty() {
        return all_gateways.clone();
    }

    GatewayRegistry {
        gateways: all_gateways
            .gateways
            .iter()
            .filter(|g| !hidden.contains(&g.id))
            .cloned()
            .collect(),
    }
}
