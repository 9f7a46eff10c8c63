//! # toggle-core
//!
//! Core types and rule-matching engine for toggle-checkout.
//!
//! This crate provides:
//! - `Rule`, `RuleSet`, and `Visibility` for administrator-configured
//!   category → payment-method restrictions
//! - `compute_hidden_methods` - the pure matcher at the heart of the engine
//! - `Gateway` and `GatewayRegistry` for the ordered payment-gateway list
//! - `Cart`, `CartItem`, and the `CartProvider` collaborator boundary
//! - `filter_available_gateways` - the checkout-side gateway filter
//! - `ToggleError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use toggle_core::{filter_available_gateways, Gateway, GatewayRegistry, Rule, RuleSet};
//! use toggle_core::{Cart, CartItem, CartProvider, CategoryId};
//!
//! let gateways = GatewayRegistry::new()
//!     .with_gateway(Gateway::new("bacs", "Direct bank transfer"))
//!     .with_gateway(Gateway::new("cod", "Cash on delivery"));
//!
//! // Hide cash on delivery whenever category 5 is in the cart
//! let rules = RuleSet::new().with_rule(Rule::hide("5", "cod"));
//!
//! let cart = Cart::new().with_item(CartItem::new("hoodie", 1, vec![CategoryId::from("5")]));
//!
//! let available =
//!     filter_available_gateways(&gateways, cart.cart_categories().as_ref(), &rules);
//! assert_eq!(available.ids(), vec!["bacs"]);
//! ```

pub mod cart;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod matcher;
pub mod rule;

// Re-exports for convenience
pub use cart::{Cart, CartItem, CartProvider};
pub use error::{ToggleError, ToggleResult};
pub use filter::filter_available_gateways;
pub use gateway::{Gateway, GatewayRegistry};
pub use matcher::compute_hidden_methods;
pub use rule::{CategoryId, MethodId, Rule, RuleSet, Visibility};
