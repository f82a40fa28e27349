//! JSON-file credential store
//!
//! Keeps every key in one JSON object. Writes go to a sibling temp file that
//! is renamed over the old one, so a crash never leaves a torn document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::{KeyValueStore, StoreResult};

/// File-backed store surviving restarts
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Store at `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn update<F>(&self, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>) + Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        f(&mut entries);
        self.persist(&entries).await
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Option<String> {
        match self.load().await {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    key = key,
                    error = %e,
                    "Credential store unreadable, treating key as absent"
                );
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }

    async fn clear(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        assert_eq!(store.get(keys::TOKEN).await, None);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::new(&path);
        store.set(keys::TOKEN, "abc").await.unwrap();
        store.set(keys::ROLE, "retailer").await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(keys::TOKEN).await.as_deref(), Some("abc"));
        assert_eq!(reopened.get(keys::ROLE).await.as_deref(), Some("retailer"));
    }

    #[tokio::test]
    async fn test_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        store.set(keys::TOKEN, "abc").await.unwrap();
        store.set(keys::LOGGED_ID, "u1").await.unwrap();

        store.remove(keys::TOKEN).await.unwrap();
        store.remove(keys::TOKEN).await.unwrap();

        assert_eq!(store.get(keys::TOKEN).await, None);
        assert_eq!(store.get(keys::LOGGED_ID).await.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("session.json"));
        store.set(keys::TOKEN, "abc").await.unwrap();

        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.get(keys::TOKEN).await, None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(keys::TOKEN).await, None);
        assert!(store.set(keys::TOKEN, "abc").await.is_err());
    }
}
