//! Project configuration stored in `.kuviyam/config.yaml`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KuviyamError, Result};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key
    #[default]
    Json,
    /// Single SQLite database with a key/value table
    Sqlite,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::Json => write!(f, "json"),
            StorageBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Configuration for where and how notes are persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

impl StoreConfig {
    /// Read the config from `dir`, falling back to defaults when the file is missing.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text)
            .map_err(|e| KuviyamError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Write the config into `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(dir.join(CONFIG_FILE), yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StorageBackend::Json);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = StoreConfig::load(tmp.path()).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let config = StoreConfig {
            backend: StorageBackend::Sqlite,
        };
        config.save(tmp.path()).unwrap();

        let loaded = StoreConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded.backend, StorageBackend::Sqlite);
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "backend: redis\n").unwrap();

        let result = StoreConfig::load(tmp.path());
        assert!(matches!(result, Err(KuviyamError::Config(_))));
    }
}
