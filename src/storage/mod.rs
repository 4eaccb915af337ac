//! Object storage seam for the ingestion job.
//!
//! [`ObjectStore`] is the minimal surface ingestion needs: list keys under
//! a prefix and fetch one object's bytes. Backends: a filesystem store
//! rooted at a configured directory and an in-memory store for tests.

/// Filesystem backend.
pub mod fs;
/// In-memory backend.
pub mod memory;

use crate::config::StorageConfig;
use crate::types::Result;
use async_trait::async_trait;
use std::env;
use std::sync::Arc;

pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// All keys starting with the prefix, sorted. A prefix with no objects
    /// yields an empty list, not an error.
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;

    /// The object's raw bytes.
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Which object store to construct at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Fs,
    Memory,
}

impl StorageBackend {
    /// Reads `STORAGE_BACKEND`. Unrecognized values fall back to the default.
    pub fn from_env() -> Self {
        match env::var("STORAGE_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" | "in-memory" => StorageBackend::Memory,
            "" | "fs" | "filesystem" => StorageBackend::Fs,
            other => {
                tracing::warn!(backend = %other, "Unknown storage backend, defaulting to fs");
                StorageBackend::Fs
            }
        }
    }

    pub fn create(&self, config: &StorageConfig) -> Arc<dyn ObjectStore> {
        match self {
            StorageBackend::Fs => Arc::new(FsObjectStore::new(config)),
            StorageBackend::Memory => Arc::new(InMemoryObjectStore::new()),
        }
    }
}
