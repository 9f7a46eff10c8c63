//! # Rule Matcher
//!
//! The pure core of the engine: given the set of categories present in a
//! cart and the configured rule set, compute which payment methods must be
//! hidden at checkout.
//!
//! Semantics:
//! - A rule contributes its method iff its category is in the cart set, its
//!   visibility is hide, and its method id is non-empty.
//! - Show rules carry no effect; they are only the admin-form default.
//! - Conflicting duplicates resolve as union-of-hides: one matching hide rule
//!   hides the method no matter how many show rules also match.
//! - Rules referencing unknown categories or methods are inert, not errors.
//!
//! The result is a set, so the function is independent of rule order and of
//! the iteration order of its inputs.

use crate::rule::{CategoryId, MethodId, RuleSet};
use std::collections::HashSet;

/// Compute the payment methods to hide for a cart with the given categories.
pub fn compute_hidden_methods(
    cart_categories: &HashSet<CategoryId>,
    rules: &RuleSet,
) -> HashSet<MethodId> {
    rules
        .iter()
        .filter(|rule| rule.is_restrictive())
        .filter(|rule| !rule.method.is_empty())
        .filter(|rule| cart_categories.contains(&rule.category))
        .map(|rule| rule.method.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    fn categories(ids: &[&str]) -> HashSet<CategoryId> {
        ids.iter().map(|id| CategoryId::from(*id)).collect()
    }

    #[test]
    fn test_hide_rule_matching_cart_category() {
        // Scenario A: rule hides "bacs" for category 5, cart has category 5
        let rules = RuleSet::new().with_rule(Rule::hide("5", "bacs"));

        let hidden = compute_hidden_methods(&categories(&["5"]), &rules);
        assert_eq!(hidden, ["bacs".to_string()].into_iter().collect());
    }

    #[test]
    fn test_hide_rule_for_absent_category_is_inert() {
        // Scenario B: same rule, cart has category 7 only
        let rules = RuleSet::new().with_rule(Rule::hide("5", "bacs"));

        let hidden = compute_hidden_methods(&categories(&["7"]), &rules);
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_show_rules_never_hide() {
        // Scenario C
        let rules = RuleSet::new().with_rule(Rule::show("5", "bacs"));

        let hidden = compute_hidden_methods(&categories(&["5"]), &rules);
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_empty_cart_hides_nothing() {
        let rules = RuleSet::new()
            .with_rule(Rule::hide("1", "cod"))
            .with_rule(Rule::hide("2", "bacs"));

        let hidden = compute_hidden_methods(&HashSet::new(), &rules);
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_empty_rules_hide_nothing() {
        let hidden = compute_hidden_methods(&categories(&["1", "2", "3"]), &RuleSet::new());
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_hide_wins_over_conflicting_show() {
        let rules = RuleSet::new()
            .with_rule(Rule::hide("1", "cod"))
            .with_rule(Rule::show("1", "cod"));

        let hidden = compute_hidden_methods(&categories(&["1"]), &rules);
        assert_eq!(hidden, ["cod".to_string()].into_iter().collect());

        // And in the opposite rule order
        let reversed = RuleSet::new()
            .with_rule(Rule::show("1", "cod"))
            .with_rule(Rule::hide("1", "cod"));

        let hidden = compute_hidden_methods(&categories(&["1"]), &reversed);
        assert_eq!(hidden, ["cod".to_string()].into_iter().collect());
    }

    #[test]
    fn test_rule_with_empty_method_is_inert() {
        let rules = RuleSet::new().with_rule(Rule::hide("1", ""));

        let hidden = compute_hidden_methods(&categories(&["1"]), &rules);
        assert!(hidden.is_empty());
    }

    #[test]
    fn test_result_is_subset_of_rule_methods() {
        let rules = RuleSet::new()
            .with_rule(Rule::hide("1", "cod"))
            .with_rule(Rule::hide("2", "bacs"))
            .with_rule(Rule::show("3", "stripe"));

        let hidden = compute_hidden_methods(&categories(&["1", "2", "3", "4"]), &rules);
        let referenced = rules.referenced_methods();

        assert!(hidden.iter().all(|m| referenced.contains(m)));
    }

    #[test]
    fn test_idempotent_and_order_independent() {
        let forward = RuleSet::new()
            .with_rule(Rule::hide("1", "cod"))
            .with_rule(Rule::hide("2", "bacs"))
            .with_rule(Rule::show("1", "stripe"));
        let mut backward = forward.clone();
        backward.rules.reverse();

        let cart = categories(&["1", "2"]);

        let first = compute_hidden_methods(&cart, &forward);
        let second = compute_hidden_methods(&cart, &forward);
        let permuted = compute_hidden_methods(&cart, &backward);

        assert_eq!(first, second);
        assert_eq!(first, permuted);
    }

    #[test]
    fn test_multiple_categories_union_their_hides() {
        let rules = RuleSet::new()
            .with_rule(Rule::hide("1", "cod"))
            .with_rule(Rule::hide("2", "bacs"));

        let hidden = compute_hidden_methods(&categories(&["1", "2"]), &rules);
        assert_eq!(hidden.len(), 2);
        assert!(hidden.contains("cod"));
        assert!(hidden.contains("bacs"));
    }
}
