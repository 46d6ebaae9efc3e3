//! State persistence
//!
//! The load/save contract the ledger depends on, and the JSON file
//! implementation used in production.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::PersistenceError;
use super::state::PersistedState;

/// Storage backend for the ledger document
#[async_trait]
pub trait StatePersistence: Send + Sync {
    /// Read the stored document. `Ok(None)` means nothing has been stored yet.
    async fn load(&self) -> Result<Option<PersistedState>, PersistenceError>;

    /// Replace the stored document with `state`.
    async fn save(&self, state: &PersistedState) -> Result<(), PersistenceError>;
}

/// Whole-document JSON file store.
///
/// Saves write a sibling temp file and rename it over the target, so a
/// reader never observes a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StatePersistence for JsonFileStore {
    async fn load(&self) -> Result<Option<PersistedState>, PersistenceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: &PersistedState) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(state)?;
        let temp = self.temp_path();
        fs::write(&temp, data).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::User;

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data.json"));

        let mut state = PersistedState::empty();
        state
            .users
            .as_mut()
            .unwrap()
            .insert("ada".to_string(), User { balance_dc: 42.0 });
        state.usd_to_ngn = Some(1500.0);

        store.save(&state).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, Some(state));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().await.unwrap_err();
        assert!(err.is_corrupt_document());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let store = JsonFileStore::new("/var/lib/davcoin/data.json");
        assert_eq!(
            store.temp_path(),
            PathBuf::from("/var/lib/davcoin/data.json.tmp")
        );
    }
}
