//! Key-value persistence
//!
//! Games persist exactly one integer each (their best score) and the app
//! persists its settings as JSON. Both go through `KeyValueStore`, which is
//! LocalStorage in the browser and an in-memory map everywhere else.
//!
//! Writes are fire-and-forget from the gameplay point of view: callers log a
//! failed write and carry on with the in-memory value.

use std::collections::HashMap;

use thiserror::Error;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum PersistError {
    /// No storage backend (private mode, storage disabled, no window)
    #[error("storage is unavailable")]
    Unavailable,
    /// Backend refused the write (quota, security policy)
    #[error("storage write failed: {0}")]
    Write(String),
    /// Stored JSON could not be encoded or decoded
    #[error("stored data is malformed: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Minimal synchronous string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// HashMap-backed store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, like disabled browser storage
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            failing: true,
        }
    }

    /// Builder helper to seed an entry
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        if self.failing {
            return Err(PersistError::Unavailable);
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let storage = Self::storage().ok_or(PersistError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| PersistError::Write(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.get("pongBest").is_none());
        store.set("pongBest", "12").unwrap();
        assert_eq!(store.get("pongBest").as_deref(), Some("12"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failing_store_rejects_writes() {
        let mut store = MemoryStore::failing();
        assert!(matches!(
            store.set("snakeBest", "3"),
            Err(PersistError::Unavailable)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_seeded_entry() {
        let store = MemoryStore::new().with_entry("jumperBest", "250");
        assert_eq!(store.get("jumperBest").as_deref(), Some("250"));
    }
}
