//! # Rule Types
//!
//! Administrator-configured visibility rules.
//!
//! A [`Rule`] ties one product category to one payment method and says
//! whether that method should be shown or hidden when the category is in the
//! cart. Rules arrive from an admin form, so decoding is deliberately
//! forgiving: category ids may be JSON strings or integers (store platforms
//! commonly use numeric taxonomy term ids), and any visibility value other
//! than the literal `"hide"` means show.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a payment gateway (opaque, e.g. "bacs", "cod", "stripe")
pub type MethodId = String;

/// Identifier of a product category.
///
/// Opaque. Accepts both `"5"` and `5` on deserialization and normalizes to a
/// string, since taxonomy term ids are numeric in most catalogs but the rest
/// of the pipeline treats them as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = CategoryId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a category id as a string or an integer")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CategoryId(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(CategoryId(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(CategoryId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Whether a rule's method is shown or hidden when its category matches.
///
/// `Show` is the inert default: it exists as the admin-form default and never
/// restricts anything. Only `Hide` has an effect at evaluation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Show,
    Hide,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Show => "show",
            Visibility::Hide => "hide",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Lenient by contract: only the literal "hide" hides, every other value is
// recovered to the show default rather than rejected.
impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "hide" => Visibility::Hide,
            _ => Visibility::Show,
        })
    }
}

/// One configured restriction: (category, method, visibility)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Product category this rule applies to.
    /// Missing in the input decodes as empty, which marks the rule
    /// incomplete so it is dropped before save.
    #[serde(default)]
    pub category: CategoryId,

    /// Payment method this rule controls
    #[serde(default)]
    pub method: MethodId,

    /// Show or hide the method when the category is in the cart
    #[serde(default)]
    pub visibility: Visibility,
}

impl Rule {
    /// Create a rule that hides `method` when `category` is in the cart
    pub fn hide(category: impl Into<CategoryId>, method: impl Into<MethodId>) -> Self {
        Self {
            category: category.into(),
            method: method.into(),
            visibility: Visibility::Hide,
        }
    }

    /// Create a show rule (the no-effect default)
    pub fn show(category: impl Into<CategoryId>, method: impl Into<MethodId>) -> Self {
        Self {
            category: category.into(),
            method: method.into(),
            visibility: Visibility::Show,
        }
    }

    /// True if this rule hides rather than shows
    pub fn is_restrictive(&self) -> bool {
        self.visibility == Visibility::Hide
    }

    /// A rule is complete when both references are present. Incomplete rules
    /// are dropped before save, not surfaced as errors.
    pub fn is_complete(&self) -> bool {
        !self.category.is_empty() && !self.method.is_empty()
    }
}

/// An ordered sequence of rules.
///
/// Insertion order is preserved for display only; evaluation is set-based.
/// No uniqueness is enforced on (category, method) pairs: conflicting
/// duplicates resolve as union-of-hides in the matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set (the first-install state)
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Builder: append a rule
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Copy of this rule set with incomplete rules dropped.
    ///
    /// This is the pre-save repair step for admin input: a row missing its
    /// category or method is discarded silently.
    pub fn sanitized(&self) -> RuleSet {
        RuleSet {
            rules: self
                .rules
                .iter()
                .filter(|r| r.is_complete())
                .cloned()
                .collect(),
        }
    }

    /// Sorted set of every method id any rule references, restrictive or not.
    /// Used by the admin surface to report gateways not yet covered by a rule.
    pub fn referenced_methods(&self) -> BTreeSet<MethodId> {
        self.rules.iter().map(|r| r.method.clone()).collect()
    }
}
