//! In-memory object store for tests and local experiments.

use crate::storage::ObjectStore;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Keeps objects in a map keyed by their full path. Seed it with
/// [`InMemoryObjectStore::insert`] before running a job against it.
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.objects.write().insert(key.into(), contents.into());
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let objects = self.objects.read();
        let mut keys: Vec<String> = objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let objects = self.objects.read();
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::Storage(format!("object '{}' not found", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_and_get() {
        let store = InMemoryObjectStore::new();
        store.insert("insight_docs/b.txt", "beta");
        store.insert("insight_docs/a.txt", "alpha");
        store.insert("feature_docs/x.txt", "other");

        let keys = store.list("insight_docs/").await.unwrap();
        assert_eq!(keys, vec!["insight_docs/a.txt", "insight_docs/b.txt"]);

        let bytes = store.get("insight_docs/a.txt").await.unwrap();
        assert_eq!(bytes, b"alpha");
    }

    #[tokio::test]
    async fn test_get_missing_key_fails() {
        let store = InMemoryObjectStore::new();
        let err = store.get("insight_docs/missing.txt").await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
