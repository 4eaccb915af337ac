//! Raw-HTTP model clients. One speaks the OpenAI-compatible chat API, the
//! other a Llama-style invocation endpoint whose reply body may legally be
//! empty.

use crate::config::ModelConfig;
use crate::llm::{ChatModel, CompletionBody, CompletionModel, CompletionRequest};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// ============= Chat (classification) =============

/// Chat client for an OpenAI-compatible `POST {base}/chat/completions`.
pub struct HttpChatModel {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
}

impl HttpChatModel {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.chat_base_url.trim_end_matches('/').to_string(),
            model: config.chat_model.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl ChatModel for HttpChatModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Model(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Model(format!(
                "Chat request failed ({}): {}",
                status, text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Model(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::Model("Chat response contained no content".to_string()))
    }
}

// ============= Completion (answer generation) =============

/// Completion client for a Llama-style invocation endpoint: the request is
/// `{prompt, max_gen_len, temperature, top_p}`, the reply carries
/// `generation` or `output`. An empty reply body maps to `Ok(None)`.
pub struct HttpCompletionModel {
    http_client: reqwest::Client,
    url: String,
}

impl HttpCompletionModel {
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            url: config.completion_url.clone(),
        }
    }
}

#[async_trait]
impl CompletionModel for HttpCompletionModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<CompletionBody>> {
        let response = self
            .http_client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Model(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Model(format!(
                "Generation request failed ({}): {}",
                status, text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Model(format!("Failed to read response: {}", e)))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        let body: CompletionBody = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Model(format!("Failed to parse response: {}", e)))?;

        Ok(Some(body))
    }
}
