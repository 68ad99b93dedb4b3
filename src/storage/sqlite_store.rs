use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::debug;

use super::KeyValueStore;
use crate::error::Result;

const STORE_DB: &str = "kuviyam.db";

/// SQLite-backed key/value store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the store database inside `dir`
    pub fn open(dir: &Path) -> Result<Self> {
        let conn = Connection::open(dir.join(STORE_DB))?;

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open a throwaway database that lives only as long as the store
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let text: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match text {
            Some(text) => {
                debug!(key, bytes = text.len(), "read sqlite value");
                Ok(Some(serde_json::from_str(&text)?))
            }
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &Value) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, text],
        )?;
        debug!(key, bytes = text.len(), "wrote sqlite value");
        Ok(())
    }
}
