//! Filesystem-backed object store.

use crate::config::StorageConfig;
use crate::storage::ObjectStore;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Object store over a local directory. Keys are slash-separated paths
/// relative to the root, so `feature_docs/a.txt` lives at
/// `<root>/feature_docs/a.txt`. A missing root is an error, like a missing
/// bucket; a prefix with no objects is just empty.
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.data_dir),
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Key for an absolute path under the root, always slash-separated.
    /// Paths that are not valid UTF-8 are skipped from listings.
    fn relative_key(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut key = String::new();
        for component in relative.components() {
            if !key.is_empty() {
                key.push('/');
            }
            key.push_str(component.as_os_str().to_str()?);
        }
        Some(key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await.map_err(|e| {
                AppError::Storage(format!("failed to list {}: {}", dir.display(), e))
            })?;

            while let Some(entry) = entries.next_entry().await.map_err(|e| {
                AppError::Storage(format!("failed to list {}: {}", dir.display(), e))
            })? {
                let path = entry.path();
                let file_type = entry.file_type().await.map_err(|e| {
                    AppError::Storage(format!("failed to stat {}: {}", path.display(), e))
                })?;

                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(key) = self.relative_key(&path) {
                    if key.starts_with(prefix) {
                        keys.push(key);
                    }
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.root.join(key);
        fs::read(&path)
            .await
            .map_err(|e| AppError::Storage(format!("failed to read {}: {}", key, e)))
    }
}
