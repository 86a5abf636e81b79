//! # Filesystem-backed key-value store
//!
//! Each key is a file `<base_dir>/<key>.json` holding the raw value. The
//! directory is created lazily on first write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{PresaleError, Result};
use crate::storage::KeyValueStore;

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PresaleError::StorageFailure(format!(
                "invalid storage key {key:?}"
            )));
        }
        Ok(self.base.join(format!("{key}.json")))
    }
}

fn storage_err(action: &str, path: &Path, e: std::io::Error) -> PresaleError {
    PresaleError::StorageFailure(format!("{action} {}: {e}", path.display()))
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err("read", &path, e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let path = self.key_path(key)?;
        tokio::fs::create_dir_all(&self.base)
            .await
            .map_err(|e| storage_err("create", &self.base, e))?;
        // Write a sibling temp file, then rename into place.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .map_err(|e| storage_err("write", &tmp, e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| storage_err("rename", &path, e))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err("remove", &path, e)),
        }
    }
}
