//! In-memory key-value store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use aqua_core::error::Result;
use aqua_core::session::KeyValueStore;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Non-durable key-value store backed by a `HashMap`.
///
/// Used in tests and as a fallback when no writable config directory is
/// available; values are lost at process exit.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryKeyValueStore::new();

        assert_eq!(store.get("authToken").await.unwrap(), None);

        store.set("authToken", "abc").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), Some("abc".to_string()));

        store.remove("authToken").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryKeyValueStore::new();
        let clone = store.clone();

        store.set("activeTankId", "7").await.unwrap();
        assert_eq!(clone.get("activeTankId").await.unwrap(), Some("7".to_string()));
    }
}
