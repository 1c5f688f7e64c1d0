use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::sorting::SortState;

/// Durable user preferences: the chosen sort order plus the ledger of
/// files that have already triggered a notification (name → modified time
/// last notified for). The ledger is append/update only; nothing evicts it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub sort: SortState,
    #[serde(default)]
    pub notified: BTreeMap<String, i64>,
}

impl Preferences {
    const FILE_NAME: &'static str = "preferences.toml";

    pub fn storage_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("dropdeck").join(Self::FILE_NAME))
    }

    /// Load preferences from disk; a missing or corrupt file means defaults
    pub fn load() -> Self {
        let path = match Self::storage_path() {
            Ok(p) => p,
            Err(_) => return Self::default(),
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Preferences file corrupt, starting fresh: {}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save preferences to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::storage_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// True if this name has never been notified for, or was last notified
    /// for a different modification time (the file was replaced)
    pub fn should_notify(&self, name: &str, modified: i64) -> bool {
        match self.notified.get(name) {
            None => true,
            Some(&last) => last != modified,
        }
    }

    /// Record that a notification decision was made for this file
    pub fn mark_notified(&mut self, name: &str, modified: i64) {
        self.notified.insert(name.to_string(), modified);
    }
}
