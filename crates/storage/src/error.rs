use thiserror::Error;

/// Errors that can occur when reading from or writing to a key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store refused the write.
    #[error("Write rejected for key {0}")]
    WriteRejected(String),

    /// The key cannot be used by this store.
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
