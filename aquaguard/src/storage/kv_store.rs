//! Key-value storage
//!
//! A flat JSON object of string keys to string values kept in one file,
//! the on-disk counterpart of device key-value storage. Values are usually
//! JSON documents themselves; see [`KvStore::get_json`].

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// File-backed key-value store
#[derive(Clone)]
pub struct KvStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Arc<Mutex<()>>,
}

impl KvStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a raw value
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        Ok(entries.remove(key))
    }

    /// Write a raw value, replacing any previous one
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await?;

        tracing::debug!("Stored key: {}", key);
        Ok(())
    }

    /// Remove a value. Removing a missing key is not an error.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;

        if entries.remove(key).is_some() {
            self.save(&entries).await?;
            tracing::debug!("Removed key: {}", key);
        }

        Ok(())
    }

    /// Read a value and decode it as JSON
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode a value as JSON and store it
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw).await
    }

    async fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        // An unreadable file reads as empty; the next write replaces it
        match serde_json::from_str(&content) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!("Ignoring corrupt key-value file {:?}: {}", self.path(), e);
                Ok(BTreeMap::new())
            }
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(entries)?;

        // Write to a temp file first so a crash never leaves half a file
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde::Deserialize;
    use tempfile::TempDir;

    fn create_test_store() -> (KvStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = KvStore::new(temp_dir.path().join("storage.json"));
        (store, temp_dir)
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        tanks: u32,
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let (store, _temp) = create_test_store();

        assert_eq!(store.get_item("anything").await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let (store, _temp) = create_test_store();

        store.set_item("theme", "dark").await.unwrap();
        assert_eq!(store.get_item("theme").await.unwrap(), Some("dark".to_string()));

        store.set_item("theme", "light").await.unwrap();
        assert_eq!(store.get_item("theme").await.unwrap(), Some("light".to_string()));

        store.remove_item("theme").await.unwrap();
        assert_eq!(store.get_item("theme").await.unwrap(), None);

        // Second removal is a no-op
        store.remove_item("theme").await.unwrap();
    }

    #[tokio::test]
    async fn test_json_values_persist_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        {
            let store = KvStore::new(path.clone());
            let profile = Profile {
                name: "Nemo".to_string(),
                tanks: 2,
            };
            store.set_json("profile", &profile).await.unwrap();
            store.set_item("other", "kept").await.unwrap();
        }

        {
            let store = KvStore::new(path);
            let loaded: Profile = store.get_json("profile").await.unwrap().unwrap();
            assert_eq!(loaded.name, "Nemo");
            assert_eq!(loaded.tanks, 2);
            assert_eq!(store.get_item("other").await.unwrap(), Some("kept".to_string()));
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty_and_is_replaced() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "{truncated").await.unwrap();

        assert_eq!(store.get_item("current_user").await.unwrap(), None);
        store.remove_item("current_user").await.unwrap();

        store.set_item("current_user", "{}").await.unwrap();
        assert_eq!(store.get_item("current_user").await.unwrap(), Some("{}".to_string()));

        let content = fs::read_to_string(store.path()).await.unwrap();
        assert!(serde_json::from_str::<BTreeMap<String, String>>(&content).is_ok());
    }

    #[tokio::test]
    async fn test_undecodable_value_is_an_error() {
        let (store, _temp) = create_test_store();

        store.set_item("profile", "{not json").await.unwrap();
        let result: Result<Option<Profile>> = store.get_json("profile").await;

        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
