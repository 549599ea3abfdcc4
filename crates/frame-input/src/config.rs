use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::handle::KeyboardHandle;

/// Word storage used by the live store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Atomic words; the event pump and the game loop may run on different threads.
    #[default]
    Atomic,
    /// Plain words; the event pump and the game loop share one thread.
    Local,
}

/// What to do with platform scan codes that do not fit in 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Keep the low 8 bits.
    #[default]
    Mask,
    /// Drop the event and report an error.
    Reject,
}

/// Keyboard tracker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub storage: StorageMode,
    pub out_of_range: OutOfRangePolicy,
}

impl InputConfig {
    /// Load configuration from a JSON file. A missing file yields the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Construct a zeroed keyboard store using the configured storage and
    /// scan-code policy.
    pub fn build(&self) -> KeyboardHandle {
        KeyboardHandle::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InputConfig::default();
        assert_eq!(config.storage, StorageMode::Atomic);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Mask);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = InputConfig::load_from(dir.path().join("input.json")).unwrap();
        assert_eq!(config, InputConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        let config = InputConfig {
            storage: StorageMode::Local,
            out_of_range: OutOfRangePolicy::Reject,
        };
        config.save_to(&path).unwrap();
        assert_eq!(InputConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{ "storage": "local" }"#).unwrap();
        let config = InputConfig::load_from(&path).unwrap();
        assert_eq!(config.storage, StorageMode::Local);
        assert_eq!(config.out_of_range, OutOfRangePolicy::Mask);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{ "storage": "shared-memory" }"#).unwrap();
        assert!(InputConfig::load_from(&path).is_err());
    }

    #[test]
    fn build_honors_storage_mode() {
        let config = InputConfig {
            storage: StorageMode::Local,
            ..InputConfig::default()
        };
        assert_eq!(config.build().mode(), StorageMode::Local);
        assert_eq!(InputConfig::default().build().mode(), StorageMode::Atomic);
    }
}
