// SPDX-FileCopyrightText: 2026 Pearanoid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `FileVaultStore`: the vault document on the local filesystem.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use pearanoid_config::model::{StorageConfig, VAULT_FILE_NAME};
use pearanoid_core::{HealthStatus, PearanoidError, Vault, VaultRepository};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::writer::write_atomic;

/// Stores the one vault document at `<data_root>/vault.db`.
///
/// Saves hold the write half of `lock` until the file is renamed into place,
/// even if the calling future is dropped mid-write; loads hold the read
/// half. The last successful save wins.
#[derive(Debug)]
pub struct FileVaultStore {
    data_root: PathBuf,
    path: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FileVaultStore {
    /// Create a store rooted at `data_root`. Touches nothing on disk.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let path = data_root.join(VAULT_FILE_NAME);
        Self {
            data_root,
            path,
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Create a store from the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.data_path)
    }

    /// Path of the vault document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The data root directory.
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Create the data root (and parents) if missing.
    pub async fn ensure_data_root(&self) -> Result<(), PearanoidError> {
        tokio::fs::create_dir_all(&self.data_root)
            .await
            .map_err(|e| {
                PearanoidError::Config(format!(
                    "failed to create data directory {}: {e}",
                    self.data_root.display()
                ))
            })?;
        info!(data_root = %self.data_root.display(), "data directory ready");
        Ok(())
    }
}

#[async_trait]
impl VaultRepository for FileVaultStore {
    async fn load(&self) -> Result<Vec<u8>, PearanoidError> {
        let _guard = self.lock.read().await;

        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), "vault loaded");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no vault stored yet, returning empty vault");
                Vault::default().to_json_bytes()
            }
            Err(e) => Err(PearanoidError::storage(e)),
        }
    }

    async fn save(&self, vault: &Vault) -> Result<(), PearanoidError> {
        vault.validate()?;
        let bytes = vault.to_json_bytes()?;
        let len = bytes.len();

        // The guard moves into the blocking task: a cancelled save must not
        // release the lock while its write is still in flight.
        let guard = Arc::clone(&self.lock).write_owned().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let result = write_atomic(&path, &bytes);
            drop(guard);
            result
        })
        .await
        .map_err(|e| PearanoidError::Internal(format!("vault write task failed: {e}")))?
        .map_err(PearanoidError::storage)?;

        debug!(entries = vault.entries.len(), bytes = len, "vault saved");
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, PearanoidError> {
        match tokio::fs::metadata(&self.data_root).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.data_root.display()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "data directory {} unavailable: {e}",
                self.data_root.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use pearanoid_core::VaultEntry;

    use super::*;

    fn sample_vault(n: usize) -> Vault {
        Vault {
            version: 1,
            entries: (0..n)
                .map(|i| VaultEntry {
                    id: format!("id-{i}"),
                    name: format!("site {i}"),
                    username: "alice".into(),
                    email: "alice@example.com".into(),
                    password: format!("ciphertext-{i}"),
                    section: "work".into(),
                    notes: String::new(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn load_on_fresh_root_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        let bytes = store.load().await.unwrap();
        assert_eq!(bytes, br#"{"version":1,"entries":[]}"#);
        assert!(!store.path().exists(), "load must not create the file");
    }

    #[tokio::test]
    async fn save_then_load_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        let vault = sample_vault(3);

        store.save(&vault).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, vault.to_json_bytes().unwrap());
        assert_eq!(std::fs::read(store.path()).unwrap(), loaded);
    }

    #[tokio::test]
    async fn load_returns_on_disk_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        let hand_written = b"{ \"version\": 1,\n  \"entries\": [] }\n";
        std::fs::write(store.path(), hand_written).unwrap();
        assert_eq!(store.load().await.unwrap(), hand_written);
    }

    #[tokio::test]
    async fn save_replaces_rather_than_merges() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        store.save(&sample_vault(5)).await.unwrap();
        store.save(&sample_vault(1)).await.unwrap();

        let loaded = Vault::from_slice(&store.load().await.unwrap()).unwrap();
        assert_eq!(loaded.entries.len(), 1);
    }

    #[tokio::test]
    async fn bad_version_is_rejected_and_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        store.save(&sample_vault(2)).await.unwrap();
        let before = store.load().await.unwrap();

        for version in [0, 2] {
            let mut bad = sample_vault(7);
            bad.version = version;
            let err = store.save(&bad).await.unwrap_err();
            assert!(matches!(err, PearanoidError::Validation { .. }));
        }

        assert_eq!(store.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn bad_version_on_fresh_root_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        let mut bad = sample_vault(1);
        bad.version = 2;
        assert!(store.save(&bad).await.is_err());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn save_into_missing_root_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path().join("missing"));
        let err = store.save(&sample_vault(1)).await.unwrap_err();
        assert!(matches!(err, PearanoidError::Storage { .. }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn unreadable_path_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVaultStore::new(dir.path());
        // A directory where the file should be fails with something other than NotFound.
        std::fs::create_dir(store.path()).unwrap();
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, PearanoidError::Storage { .. }));
    }

    #[tokio::test]
    async fn ensure_data_root_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let store = FileVaultStore::new(&root);
        assert!(matches!(
            store.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));

        store.ensure_data_root().await.unwrap();
        assert!(root.is_dir());
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[test]
    fn from_config_uses_vault_file_name() {
        let config = StorageConfig {
            data_path: "/srv/pearanoid".to_string(),
        };
        let store = FileVaultStore::from_config(&config);
        assert_eq!(store.path(), Path::new("/srv/pearanoid/vault.db"));
        assert_eq!(store.data_root(), Path::new("/srv/pearanoid"));
    }
}
