//! OpenSearch-compatible HTTP vector index.
//!
//! Documents use the LangChain-compatible schema (`text`,
//! `metadata.source`, `vector_field`) so indexes written by other tooling
//! stay readable. Retrieval is a kNN `_search`; ingestion is one NDJSON
//! `_bulk` call carrying the configured timeout.

use crate::config::VectorConfig;
use crate::types::{AppError, Document, Result, ScoredDocument};
use crate::vector::{EmbeddingClient, VectorIndex};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

pub struct HttpVectorIndex {
    http_client: reqwest::Client,
    base_url: String,
    embedder: Arc<dyn EmbeddingClient>,
    bulk_timeout: Duration,
}

impl HttpVectorIndex {
    pub fn new(config: &VectorConfig, embedder: Arc<dyn EmbeddingClient>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            embedder,
            bulk_timeout: Duration::from_secs(config.bulk_timeout_secs),
        }
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let embeddings = self.embedder.embed(&[query.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Index("Embedding returned no vector for the query".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_score")]
    score: f32,
    #[serde(rename = "_source")]
    source: HitSource,
}

#[derive(Debug, Deserialize)]
struct HitSource {
    #[serde(default)]
    text: String,
    #[serde(default)]
    metadata: HitMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct HitMetadata {
    #[serde(default)]
    source: String,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

impl BulkResponse {
    fn first_error(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| item.get("index")?.get("error")?.get("reason")?.as_str())
            .next()
            .unwrap_or("bulk indexing reported errors")
            .to_string()
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn search(&self, index: &str, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>> {
        let vector = self.embed_query(query).await?;

        let url = format!("{}/{}/_search", self.base_url, index);
        let body = json!({
            "size": top_k,
            "query": { "knn": { "vector_field": { "vector": vector, "k": top_k } } }
        });

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Index(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Index(format!(
                "Search request failed ({}): {}",
                status, text
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Index(format!("Failed to parse response: {}", e)))?;

        Ok(parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| ScoredDocument {
                document: Document {
                    content: hit.source.text,
                    source: hit.source.metadata.source,
                },
                score: hit.score,
            })
            .collect())
    }

    async fn add_documents(&self, index: &str, documents: &[Document]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let contents: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
        let embeddings = self.embedder.embed(&contents).await?;

        let mut payload = String::new();
        for (document, embedding) in documents.iter().zip(embeddings.iter()) {
            let action = json!({
                "index": { "_index": index, "_id": uuid::Uuid::new_v4().to_string() }
            });
            let source = json!({
                "text": document.content,
                "metadata": { "source": document.source },
                "vector_field": embedding,
            });
            payload.push_str(&action.to_string());
            payload.push('\n');
            payload.push_str(&source.to_string());
            payload.push('\n');
        }

        let url = format!("{}/_bulk", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .timeout(self.bulk_timeout)
            .body(payload)
            .send()
            .await
            .map_err(|e| AppError::Index(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Index(format!(
                "Bulk request failed ({}): {}",
                status, text
            )));
        }

        let parsed: BulkResponse = response
            .json()
            .await
            .map_err(|e| AppError::Index(format!("Failed to parse response: {}", e)))?;

        if parsed.errors {
            return Err(AppError::Index(parsed.first_error()));
        }

        Ok(documents.len())
    }
}
