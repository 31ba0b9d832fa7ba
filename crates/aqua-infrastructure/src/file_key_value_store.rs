//! File-backed key-value store implementation.
//!
//! Implements the [`KeyValueStore`] trait over a single JSON object file,
//! giving the session manager durable storage that survives restarts.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use aqua_core::error::{AquaError, Result};
use aqua_core::session::KeyValueStore;
use async_trait::async_trait;

use crate::paths::AquaPaths;
use crate::storage::{AtomicJsonError, AtomicJsonFile};

/// Durable key-value store over a JSON file.
///
/// All keys share one file (`state.json` by default). Every write goes
/// through an exclusive file lock and an atomic rename, so concurrent
/// writes to the same key are serialized rather than racing.
///
/// File I/O runs on the blocking thread pool via `spawn_blocking`, keeping
/// the async callers non-blocking.
#[derive(Clone)]
pub struct FileKeyValueStore {
    file: Arc<AtomicJsonFile<BTreeMap<String, String>>>,
}

impl FileKeyValueStore {
    /// Creates a store over the default state file (`~/.config/aqua/state.json`).
    pub fn new() -> Result<Self> {
        let path = AquaPaths::state_file()
            .map_err(|e| AquaError::config(format!("Failed to resolve state file: {}", e)))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store over a custom file path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicJsonFile::new(path)),
        }
    }

    fn map_err(err: AtomicJsonError) -> AquaError {
        match err {
            AtomicJsonError::IoError(e) => AquaError::io(e.to_string()),
            AtomicJsonError::JsonError(e) => AquaError::from(e),
            AtomicJsonError::LockError(e) => AquaError::data_access(e),
        }
    }

    async fn run_blocking<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&AtomicJsonFile<BTreeMap<String, String>>) -> std::result::Result<R, AtomicJsonError>
            + Send
            + 'static,
        R: Send + 'static,
    {
        let file = self.file.clone();
        tokio::task::spawn_blocking(move || f(&file).map_err(Self::map_err))
            .await
            .map_err(|e| AquaError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            let map = file.load()?.unwrap_or_default();
            Ok(map.get(&key).cloned())
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let key = key.to_string();
        let value = value.to_string();
        self.run_blocking(move |file| {
            file.update(BTreeMap::new(), |map| {
                map.insert(key, value);
                Ok(())
            })
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.run_blocking(move |file| {
            file.update(BTreeMap::new(), |map| {
                map.remove(&key);
                Ok(())
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileKeyValueStore {
        FileKeyValueStore::with_path(dir.path().join("state.json"))
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("authToken", "abc123").await.unwrap();
        let value = store.get("authToken").await.unwrap();
        assert_eq!(value, Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let value = store.get("authToken").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("activeTankId", "42").await.unwrap();
        store.remove("activeTankId").await.unwrap();
        assert_eq!(store.get("activeTankId").await.unwrap(), None);

        // Removing an absent key is a no-op.
        store.remove("activeTankId").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("authToken", "abc").await.unwrap();
        store.set("activeTankId", "42").await.unwrap();
        store.remove("authToken").await.unwrap();

        assert_eq!(store.get("activeTankId").await.unwrap(), Some("42".to_string()));
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let store = FileKeyValueStore::with_path(path.clone());
        store.set("authToken", "abc").await.unwrap();
        drop(store);

        let reopened = FileKeyValueStore::with_path(path);
        assert_eq!(
            reopened.get("authToken").await.unwrap(),
            Some("abc".to_string())
        );
    }
}
