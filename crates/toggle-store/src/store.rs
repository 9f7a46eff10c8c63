//! # Settings Store Trait
//!
//! Persistence contract for the configured rule set.
//!
//! The rule set is stored as one opaque blob under a stable key and replaced
//! wholesale on every administrator save. Stores perform no validation;
//! callers sanitize before saving. Concurrent saves are last-write-wins at
//! the storage layer.

use async_trait::async_trait;
use std::sync::Arc;
use toggle_core::{RuleSet, ToggleResult};

/// Persistence backend for the configured rule set.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the persisted rule set.
    ///
    /// Returns an empty rule set when nothing has ever been saved; absence is
    /// not an error. Only genuine I/O failures surface as errors.
    async fn load(&self) -> ToggleResult<RuleSet>;

    /// Atomically replace the entire persisted rule set.
    async fn save(&self, rules: &RuleSet) -> ToggleResult<()>;

    /// Backend name (for logging)
    fn backend_name(&self) -> &'static str;
}

/// Type alias for a shared settings store (dynamic dispatch)
pub type BoxedSettingsStore = Arc<dyn SettingsStore>;
