//! Batch text embedding.

use crate::config::VectorConfig;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    /// Embeds every text, preserving order. Implementations must return
    /// exactly one vector per input text.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Client for an Ollama-compatible batch embed API:
/// `POST {base}/api/embed` with `{"model", "input"}` replying
/// `{"embeddings": [[..]]}`.
pub struct HttpEmbeddingClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl HttpEmbeddingClient {
    pub fn new(config: &VectorConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.embedding_base_url.trim_end_matches('/').to_string(),
            model: config.embedding_model.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        let body = json!({ "model": self.model, "input": texts });

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
                "Embedding request failed ({}): {}",
                status, text
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| AppError::Index(format!("Failed to parse response: {}", e)))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(AppError::Index(format!(
                "Embedding count mismatch: {} inputs, {} vectors",
                texts.len(),
                parsed.embeddings.len()
            )));
        }

        Ok(parsed.embeddings)
    }
}
