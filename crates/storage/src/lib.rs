//! Durable key-value storage used to persist the cart between sessions.
//!
//! Values are opaque strings; the cart crate owns the encoding.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{Result, StorageError};
pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use store::{KeyValueStore, KeyValueStoreExt};
