use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::KeyValueStore;
use crate::error::{KuviyamError, Result};

/// Stores each key as `<dir>/<key>.json`.
///
/// Saves go to a temporary sibling first and are renamed into place, so the
/// file under a key is always a complete value.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KuviyamError::Storage(format!("invalid key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        debug!(key, bytes = bytes.len(), "read json value");
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &path)?;

        debug!(key, bytes = bytes.len(), "wrote json value");
        Ok(())
    }
}
