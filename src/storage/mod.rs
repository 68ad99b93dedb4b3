//! Key/value persistence for the note collection and settings.
//!
//! Every save writes the whole value under its key, replacing what was
//! there. Two writers sharing one store will silently overwrite each other
//! (last write wins); this crate assumes a single writer.

mod json_store;
mod sqlite_store;

pub use json_store::JsonFileStore;
pub use sqlite_store::SqliteStore;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use crate::config::{StorageBackend, StoreConfig};
use crate::entity::{Note, Settings};
use crate::error::{KuviyamError, Result};

pub const KUVIYAM_DIR: &str = ".kuviyam";
pub const NOTES_KEY: &str = "notes";
pub const SETTINGS_KEY: &str = "settings";

/// A store of opaque JSON values by key.
///
/// `save` must replace the value atomically: a concurrent `load` of the same
/// key sees either the old value or the new one, never a mix.
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if it was never set.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|e| KuviyamError::Storage(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| KuviyamError::Storage(e.to_string()))?;
        values.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Load the note collection; an unset key is an empty collection.
pub fn load_notes<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Note>> {
    let notes: Vec<Note> = match store.load(NOTES_KEY)? {
        Some(Value::Null) | None => Vec::new(),
        Some(value) => serde_json::from_value(value)?,
    };
    debug!(count = notes.len(), "loaded notes");
    Ok(notes)
}

/// Replace the stored note collection with `notes`.
pub fn save_notes<S: KeyValueStore + ?Sized>(store: &S, notes: &[Note]) -> Result<()> {
    store.save(NOTES_KEY, &serde_json::to_value(notes)?)?;
    debug!(count = notes.len(), "saved notes");
    Ok(())
}

/// Load the settings; an unset key yields the defaults.
pub fn load_settings<S: KeyValueStore + ?Sized>(store: &S) -> Result<Settings> {
    match store.load(SETTINGS_KEY)? {
        Some(Value::Null) | None => Ok(Settings::default()),
        Some(value) => Ok(serde_json::from_value(value)?),
    }
}

pub fn save_settings<S: KeyValueStore + ?Sized>(store: &S, settings: &Settings) -> Result<()> {
    store.save(SETTINGS_KEY, &serde_json::to_value(settings)?)
}

/// A kuviyam data directory (`<root>/.kuviyam`).
#[derive(Debug, Clone)]
pub struct Project {
    dir: PathBuf,
}

impl Project {
    /// Initialize a new project under `root`
    pub fn init(root: &Path, config: &StoreConfig) -> Result<Self> {
        let dir = root.join(KUVIYAM_DIR);

        if dir.exists() {
            return Err(KuviyamError::AlreadyInitialized);
        }

        fs::create_dir_all(&dir)?;
        config.save(&dir)?;

        Ok(Self { dir })
    }

    /// Open an existing project under `root`
    pub fn open(root: &Path) -> Result<Self> {
        let dir = root.join(KUVIYAM_DIR);

        if !dir.is_dir() {
            return Err(KuviyamError::NotInitialized);
        }

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> Result<StoreConfig> {
        StoreConfig::load(&self.dir)
    }

    /// Open the store selected by the project config.
    pub fn open_store(&self) -> Result<Box<dyn KeyValueStore>> {
        let config = self.config()?;
        debug!(backend = %config.backend, dir = %self.dir.display(), "opening store");
        Ok(match config.backend {
            StorageBackend::Json => Box::new(JsonFileStore::open(&self.dir)?),
            StorageBackend::Sqlite => Box::new(SqliteStore::open(&self.dir)?),
        })
    }
}
