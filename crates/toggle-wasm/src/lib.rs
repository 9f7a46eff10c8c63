//! # toggle-wasm
//!
//! WebAssembly bindings for toggle-checkout-rs.
//!
//! This crate lets a storefront run the live preview fully client-side:
//! given the rule set and the categories currently selected, it reports
//! which payment method options to hide, with the same hide-wins semantics
//! as the server-side matcher.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { hidden_methods } from 'toggle-checkout-wasm';
//!
//! await init();
//!
//! const hidden = hidden_methods(
//!   [5, 9],
//!   [{ category: 5, method: 'cod', visibility: 'hide' }]
//! );
//!
//! document.querySelectorAll('input[name="payment-method"]').forEach((el) => {
//!   el.closest('li').hidden = hidden.includes(el.value);
//! });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use toggle_core::{compute_hidden_methods, CategoryId, Rule, RuleSet};
use wasm_bindgen::prelude::*;

fn hidden_for(categories: Vec<CategoryId>, rules: Vec<Rule>) -> Vec<String> {
    let categories = categories.into_iter().collect();
    let rules = RuleSet { rules };

    let mut hidden: Vec<String> = compute_hidden_methods(&categories, &rules)
        .into_iter()
        .collect();
    hidden.sort();
    hidden
}

/// Compute the payment method ids to hide for the given category ids.
///
/// `categories` is an array of ids (strings or numbers); `rules` is an array
/// of `{category, method, visibility}` objects. Returns a sorted array of
/// method ids.
#[wasm_bindgen]
pub fn hidden_methods(categories: JsValue, rules: JsValue) -> Result<JsValue, JsValue> {
    let categories: Vec<CategoryId> = serde_wasm_bindgen::from_value(categories)
        .map_err(|e| JsValue::from_str(&format!("Invalid categories: {}", e)))?;
    let rules: Vec<Rule> = serde_wasm_bindgen::from_value(rules)
        .map_err(|e| JsValue::from_str(&format!("Invalid rules: {}", e)))?;

    serde_wasm_bindgen::to_value(&hidden_for(categories, rules))
        .map_err(|e| JsValue::from_str(&format!("Failed to encode result: {}", e)))
}

/// Check a single payment method against the rules for the given categories
#[wasm_bindgen]
pub fn is_method_hidden(
    method: &str,
    categories: JsValue,
    rules: JsValue,
) -> Result<bool, JsValue> {
    let hidden = hidden_methods(categories, rules)?;
    let hidden: Vec<String> = serde_wasm_bindgen::from_value(hidden)
        .map_err(|e| JsValue::from_str(&format!("Failed to decode result: {}", e)))?;
    Ok(hidden.iter().any(|m| m == method))
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
