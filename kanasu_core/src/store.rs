//! Persistent key-value store.
//!
//! Client state (signed-in user, preferred language, chat log, selected
//! career) is kept as unversioned JSON blobs, one row per key, in SQLite.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;

// ============================================================
// STORE KEYS
// ============================================================

pub const USER_KEY: &str = "kanasu_user";
pub const LANGUAGE_KEY: &str = "preferred_language";
pub const CHAT_KEY: &str = "kanasu_chat";
pub const SELECTED_CAREER_KEY: &str = "selectedCareer";

const DEFAULT_DB_FILE: &str = "kanasu.db";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

// ============================================================
// KEY-VALUE STORE (SQLite-backed)
// ============================================================

#[derive(Clone)]
pub struct KeyValueStore {
    conn: Arc<Mutex<Connection>>,
}

impl KeyValueStore {
    /// Opens (or creates) the store at `db_path`, `kanasu.db` when unset.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("[STORE] Could not create {}: {}", parent.display(), e);
            }
        }
        let conn = Connection::open(&path)?;
        conn.execute(SCHEMA, [])?;
        log::info!("[STORE] Opened {}", path.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create an in-memory store for testing
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock();
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Deserializes the blob under `key`. A malformed blob is an error.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, &raw)
    }

    /// Returns whether a row was deleted.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let conn = self.lock();
        let removed = conn.execute("DELETE FROM kv_entries WHERE key = ?1", [key])?;
        Ok(removed > 0)
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get_raw(key)?.is_some())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanasuError;

    #[test]
    fn set_get_remove() {
        let store = KeyValueStore::in_memory().unwrap();
        assert!(store.get_raw(LANGUAGE_KEY).unwrap().is_none());

        store.set_raw(LANGUAGE_KEY, "kn").unwrap();
        store.set_raw(LANGUAGE_KEY, "en").unwrap();
        assert_eq!(store.get_raw(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));

        assert!(store.remove(LANGUAGE_KEY).unwrap());
        assert!(!store.remove(LANGUAGE_KEY).unwrap());
        assert!(!store.contains(LANGUAGE_KEY).unwrap());
    }

    #[test]
    fn json_roundtrip_and_malformed_blob() {
        let store = KeyValueStore::in_memory().unwrap();
        store.set_json(SELECTED_CAREER_KEY, &vec!["a", "b"]).unwrap();
        let back: Vec<String> = store.get_json(SELECTED_CAREER_KEY).unwrap().unwrap();
        assert_eq!(back, vec!["a", "b"]);

        store.set_raw(SELECTED_CAREER_KEY, "{not json").unwrap();
        let err = store.get_json::<Vec<String>>(SELECTED_CAREER_KEY).unwrap_err();
        assert!(matches!(err, KanasuError::Serialization(_)));
    }
}
