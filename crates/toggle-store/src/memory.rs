//! # In-Memory Settings Store
//!
//! Volatile backend for tests and embedded use. Same last-write-wins
//! semantics as the file store, without the disk.

use crate::store::SettingsStore;
use async_trait::async_trait;
use std::sync::RwLock;
use toggle_core::{RuleSet, ToggleError, ToggleResult};

/// Settings store that keeps the rule set in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    rules: RwLock<RuleSet>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(RuleSet::new()),
        }
    }

    /// Create a store pre-populated with rules
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> ToggleResult<RuleSet> {
        self.rules
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| ToggleError::Internal("Settings lock poisoned".to_string()))
    }

    async fn save(&self, rules: &RuleSet) -> ToggleResult<()> {
        let mut guard = self
            .rules
            .write()
            .map_err(|_| ToggleError::Internal("Settings lock poisoned".to_string()))?;
        *guard = rules.clone();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
