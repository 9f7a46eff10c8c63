//! # toggle-store
//!
//! Settings persistence backends for toggle-checkout.
//!
//! The configured rule set lives in exactly one place: a single named blob
//! that is replaced wholesale on every administrator save. This crate
//! provides the [`SettingsStore`] contract plus two backends:
//!
//! 1. **FileStore** - JSON snapshot on disk
//!    - Atomic replace via temp file + rename
//!    - Missing or undecodable file loads as an empty rule set
//!    - Best for: single-node deployments
//!
//! 2. **MemoryStore** - process-local
//!    - Best for: tests and embedding the engine in another service
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use toggle_store::{FileStore, SettingsStore};
//! use toggle_core::{Rule, RuleSet};
//!
//! let store = FileStore::new("data/payment_settings.json");
//!
//! let rules = RuleSet::new().with_rule(Rule::hide("5", "cod"));
//! store.save(&rules).await?;
//!
//! let loaded = store.load().await?;
//! assert_eq!(loaded, rules);
//! ```

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{BoxedSettingsStore, SettingsStore};
