//! CLI error types.

use std::path::PathBuf;

use storage::StorageError;
use thiserror::Error;

/// Errors that stop the CLI before or while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The product fixture could not be read.
    #[error("Cannot read fixture {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The fixture or output could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
