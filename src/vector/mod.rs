//! Vector index seam and backends.
//!
//! [`VectorIndex`] covers the two operations the pipeline needs: top-K
//! similarity search and bulk document addition. Two backends implement it:
//! - [`HttpVectorIndex`] against an OpenSearch-compatible cluster,
//! - [`InMemoryVectorIndex`] for local runs and tests.
//!
//! Both embed text through the [`EmbeddingClient`] seam.

/// Embedding seam and the batch HTTP client.
pub mod embeddings;
/// OpenSearch-compatible HTTP backend.
pub mod http;
/// In-memory cosine-similarity backend.
pub mod memory;

use crate::config::VectorConfig;
use crate::types::{Document, Result, ScoredDocument};
use async_trait::async_trait;
use std::env;
use std::sync::Arc;

pub use embeddings::{EmbeddingClient, HttpEmbeddingClient};
pub use http::HttpVectorIndex;
pub use memory::InMemoryVectorIndex;

/// Nearest-neighbor search plus bulk addition over named indexes.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Top-K documents most similar to the query, in rank order.
    async fn search(&self, index: &str, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>>;

    /// Embeds and adds a batch of documents, creating the index when it
    /// does not exist yet. Returns the number of documents added.
    async fn add_documents(&self, index: &str, documents: &[Document]) -> Result<usize>;
}

/// Which vector backend to construct at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VectorBackend {
    #[default]
    Http,
    Memory,
}

impl VectorBackend {
    /// Reads `VECTOR_BACKEND`. Unrecognized values fall back to the default.
    pub fn from_env() -> Self {
        match env::var("VECTOR_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" | "in-memory" => VectorBackend::Memory,
            "" | "http" | "opensearch" => VectorBackend::Http,
            other => {
                tracing::warn!(backend = %other, "Unknown vector backend, defaulting to http");
                VectorBackend::Http
            }
        }
    }

    pub fn create(
        &self,
        config: &VectorConfig,
        embedder: Arc<dyn EmbeddingClient>,
    ) -> Arc<dyn VectorIndex> {
        match self {
            VectorBackend::Http => Arc::new(HttpVectorIndex::new(config, embedder)),
            VectorBackend::Memory => Arc::new(InMemoryVectorIndex::new(embedder)),
        }
    }
}
