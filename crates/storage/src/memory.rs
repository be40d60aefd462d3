use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{KeyValueStore, Result, StorageError};

/// In-memory key-value store for testing.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// inspect what the code under test wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    fail_on_write: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to reject every write until reset.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.fail_on_write.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Stores a value directly, bypassing failure injection and the write
    /// counter.
    pub async fn raw_insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().await.insert(key.into(), value.into());
    }

    /// Returns the raw value under a key.
    pub async fn raw_get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    /// Clears all values.
    pub async fn clear(&self) {
        self.values.write().await.clear();
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: String) -> Result<()> {
        if self.fail_on_write.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected(key.to_string()));
        }

        self.values.write().await.insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyValueStoreExt;

    #[tokio::test]
    async fn read_missing_key_returns_none() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.read("missing").await.unwrap(), None);
        assert!(!store.contains("missing").await.unwrap());
    }

    #[tokio::test]
    async fn write_then_read() {
        let store = InMemoryKeyValueStore::new();
        store.write("cart", "[]".to_string()).await.unwrap();

        assert_eq!(store.read("cart").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn write_replaces_previous_value() {
        let store = InMemoryKeyValueStore::new();
        store.write("cart", "a".to_string()).await.unwrap();
        store.write("cart", "b".to_string()).await.unwrap();

        assert_eq!(store.read("cart").await.unwrap().as_deref(), Some("b"));
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn fail_on_write_keeps_previous_value() {
        let store = InMemoryKeyValueStore::new();
        store.write("cart", "a".to_string()).await.unwrap();
        store.set_fail_on_write(true);

        let result = store.write("cart", "b".to_string()).await;
        assert!(matches!(result, Err(StorageError::WriteRejected(key)) if key == "cart"));
        assert_eq!(store.read("cart").await.unwrap().as_deref(), Some("a"));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn clones_share_values() {
        let store = InMemoryKeyValueStore::new();
        let handle = store.clone();
        store.write("cart", "x".to_string()).await.unwrap();

        assert_eq!(handle.raw_get("cart").await.as_deref(), Some("x"));
        handle.clear().await;
        assert_eq!(store.read("cart").await.unwrap(), None);
    }
}
