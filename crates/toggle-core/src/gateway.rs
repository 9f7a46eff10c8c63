//! # Gateway Types
//!
//! Payment gateway registry types.
//! The live registry is loaded from `config/gateways.toml` and stands in for
//! the platform's gateway collaborator at the checkout boundary.

use crate::rule::MethodId;
use serde::{Deserialize, Serialize};

/// A configured payment gateway offered at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gateway {
    /// Stable gateway identifier (e.g. "bacs", "cod", "stripe")
    pub id: MethodId,

    /// Display name shown to the customer
    pub title: String,

    /// Short description
    #[serde(default)]
    pub description: String,

    /// Whether this gateway is enabled at all (independent of rules)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Optional icon URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Gateway-specific metadata (fees, supported currencies, etc.)
    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub metadata: std::collections::HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

impl Gateway {
    /// Create a new enabled gateway
    pub fn new(id: impl Into<MethodId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            enabled: true,
            icon_url: None,
            metadata: std::collections::HashMap::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set icon URL
    pub fn with_icon(mut self, url: impl Into<String>) -> Self {
        self.icon_url = Some(url.into());
        self
    }

    /// Builder: add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Builder: mark the gateway disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Ordered registry of payment gateways.
///
/// Insertion order is the order gateways are rendered at checkout, and lookup
/// is by id, so this behaves as the ordered id→gateway map the checkout flow
/// expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayRegistry {
    #[serde(default)]
    pub gateways: Vec<Gateway>,
}

impl GatewayRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            gateways: Vec::new(),
        }
    }

    /// Add a gateway to the registry
    pub fn add(&mut self, gateway: Gateway) {
        self.gateways.push(gateway);
    }

    /// Builder: add a gateway
    pub fn with_gateway(mut self, gateway: Gateway) -> Self {
        self.add(gateway);
        self
    }

    /// Find a gateway by id
    pub fn get(&self, id: &str) -> Option<&Gateway> {
        self.gateways.iter().find(|g| g.id == id)
    }

    /// True if a gateway with this id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Gateways currently enabled, in registry order
    pub fn enabled_gateways(&self) -> impl Iterator<Item = &Gateway> {
        self.gateways.iter().filter(|g| g.enabled)
    }

    /// All gateway ids, in registry order
    pub fn ids(&self) -> Vec<&str> {
        self.gateways.iter().map(|g| g.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }

    /// Load a registry from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
