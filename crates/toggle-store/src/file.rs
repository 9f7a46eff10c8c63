//! # File-Backed Settings Store
//!
//! Persists the rule set as a single JSON snapshot on disk. The file path is
//! the stable key; each save serializes the full rule set, writes it to a
//! temp file in the same directory, and renames it over the target, so a
//! reader never observes a partial write.

use crate::store::SettingsStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use toggle_core::{RuleSet, ToggleError, ToggleResult};
use tracing::{debug, warn};

/// One persisted snapshot of the rule set
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettingsSnapshot {
    /// When this snapshot was saved
    saved_at: DateTime<Utc>,

    /// The full rule set
    #[serde(default)]
    rules: RuleSet,
}

/// Settings store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store for the given settings file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        // Same directory as the target so the rename stays on one filesystem
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "settings.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SettingsStore for FileStore {
    async fn load(&self) -> ToggleResult<RuleSet> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings file at {}, starting empty", self.path.display());
                return Ok(RuleSet::new());
            }
            Err(e) => {
                return Err(ToggleError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        match serde_json::from_slice::<SettingsSnapshot>(&bytes) {
            Ok(snapshot) => Ok(snapshot.rules),
            Err(e) => {
                // An undecodable blob is treated like an absent one so that
                // load never takes the checkout path down with it.
                warn!(
                    "Settings file {} is not decodable ({}), treating as empty",
                    self.path.display(),
                    e
                );
                Ok(RuleSet::new())
            }
        }
    }

    async fn save(&self, rules: &RuleSet) -> ToggleResult<()> {
        let snapshot = SettingsSnapshot {
            saved_at: Utc::now(),
            rules: rules.clone(),
        };

        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| ToggleError::Serialization(format!("Failed to encode settings: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    ToggleError::Storage(format!(
                        "Failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await.map_err(|e| {
            ToggleError::Storage(format!("Failed to write {}: {}", temp.display(), e))
        })?;

        tokio::fs::rename(&temp, &self.path).await.map_err(|e| {
            ToggleError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        debug!(
            "Saved {} rules to {}",
            rules.len(),
            self.path.display()
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
