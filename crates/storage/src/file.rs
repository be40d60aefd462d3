use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{KeyValueStore, Result, StorageError};

/// Key-value store keeping one file per key inside a directory.
///
/// Keys are percent-escaped into file names, so any non-empty key is
/// accepted. Writes go to a temporary file that is renamed over the target,
/// which keeps a reader from ever seeing a half-written value.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        tracing::debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    /// Returns the directory holding the stored files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        Ok(self.root.join(file_name_for(key)?))
    }
}

/// Maps a key to a file name, escaping every byte outside `[A-Za-z0-9._-]`.
fn file_name_for(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' => name.push(byte as char),
            // a leading dot would hide the file and collide with temp files
            b'.' if !name.is_empty() => name.push('.'),
            _ => {
                let _ = write!(name, "%{byte:02X}");
            }
        }
    }
    Ok(name)
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: String) -> Result<()> {
        let name = file_name_for(key)?;
        let target = self.root.join(&name);
        let temp = self.root.join(format!(".{name}.tmp"));

        tokio::fs::write(&temp, value).await?;
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                tracing::warn!(path = %temp.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(e.into());
        }
        Ok(())
    }
}
