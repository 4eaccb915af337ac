//! In-memory vector index for local runs and tests.

use crate::types::{AppError, Document, Result, ScoredDocument};
use crate::vector::{EmbeddingClient, VectorIndex};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cosine-similarity index over embedded documents.
///
/// Nothing is persisted; contents are lost when the process exits.
pub struct InMemoryVectorIndex {
    embedder: Arc<dyn EmbeddingClient>,
    indexes: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

struct StoredDocument {
    document: Document,
    embedding: Vec<f32>,
}

impl InMemoryVectorIndex {
    pub fn new(embedder: Arc<dyn EmbeddingClient>) -> Self {
        Self {
            embedder,
            indexes: RwLock::new(HashMap::new()),
        }
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn search(&self, index: &str, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>> {
        let embeddings = self.embedder.embed(&[query.to_string()]).await?;
        let query_vector = embeddings.into_iter().next().ok_or_else(|| {
            AppError::Index("Embedding returned no vector for the query".to_string())
        })?;

        let indexes = self.indexes.read();
        let stored = indexes
            .get(index)
            .ok_or_else(|| AppError::Index(format!("Index '{}' not found", index)))?;

        let mut results: Vec<ScoredDocument> = stored
            .iter()
            .map(|entry| ScoredDocument {
                document: entry.document.clone(),
                score: Self::cosine_similarity(&query_vector, &entry.embedding),
            })
            .collect();

        // Sort by score descending
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }

    async fn add_documents(&self, index: &str, documents: &[Document]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embedder.embed(&contents).await?;

        if embeddings.len() != documents.len() {
            return Err(AppError::Index(format!(
                "Embedding count mismatch: {} documents, {} vectors",
                documents.len(),
                embeddings.len()
            )));
        }

        let mut indexes = self.indexes.write();
        let stored = indexes.entry(index.to_string()).or_default();
        for (document, embedding) in documents.iter().zip(embeddings) {
            stored.push(StoredDocument {
                document: document.clone(),
                embedding,
            });
        }

        Ok(documents.len())
    }
}
