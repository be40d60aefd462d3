use async_trait::async_trait;

use crate::Result;

/// Core trait for key-value store implementations.
///
/// A store maps string keys to string blobs. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns None if nothing has been written under the key.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// When this returns Ok, a subsequent `read` of the same key observes
    /// `value`.
    async fn write(&self, key: &str, value: String) -> Result<()>;
}

/// Extension trait providing convenience methods for key-value stores.
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Checks if a value exists under the key.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read(key).await?.is_some())
    }
}

// Blanket implementation for all KeyValueStore implementations
impl<T: KeyValueStore + ?Sized> KeyValueStoreExt for T {}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &str, value: String) -> Result<()> {
        (**self).write(key, value).await
    }
}
