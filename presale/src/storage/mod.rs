//! # Key-value persistence for local session state
//!
//! [`KeyValueStore`] is the seam between the credential store and whatever
//! actually keeps bytes around: device storage, a directory of files, or a
//! map in memory. Values are opaque strings at this layer; [`get_json`] and
//! [`set_json`] apply the JSON codec at the boundary.
//!
//! | Backend | Use |
//! |---------|-----|
//! | [`MemoryStore`] | tests and throwaway sessions |
//! | [`FileStore`] | the CLI, one `<key>.json` file per key |
//!
//! Access is assumed to be serial (one client process); backends do not
//! coordinate concurrent writers beyond what their own locking gives.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PresaleError, Result};

/// Persistence backend addressed by string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<()>> + Send;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Read and decode the JSON value under `key`.
pub async fn get_json<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PresaleError::StorageFailure(format!("corrupt value under {key:?}: {e}"))),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`.
pub async fn set_json<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}
