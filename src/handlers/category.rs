//! Retrieval-augmented answer generation for one category.

use crate::envelope::{extract_input, FunctionResponse};
use crate::handlers::FunctionHandler;
use crate::llm::prompts::answer_prompt;
use crate::llm::{CompletionModel, CompletionRequest, GenerationParams};
use crate::types::{AppError, Result};
use crate::vector::VectorIndex;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// One category's answer function. All three category functions are this
/// handler pointed at a different index; the pipeline stays the same:
/// retrieve top-K context, prompt the completion model, return the trimmed
/// answer.
pub struct CategoryHandler {
    name: String,
    index_name: String,
    top_k: usize,
    index: Arc<dyn VectorIndex>,
    model: Arc<dyn CompletionModel>,
    params: GenerationParams,
}

impl CategoryHandler {
    pub fn new(
        name: impl Into<String>,
        index_name: impl Into<String>,
        top_k: usize,
        index: Arc<dyn VectorIndex>,
        model: Arc<dyn CompletionModel>,
        params: GenerationParams,
    ) -> Self {
        Self {
            name: name.into(),
            index_name: index_name.into(),
            top_k,
            index,
            model,
            params,
        }
    }

    async fn run(&self, event: &Value) -> Result<String> {
        let query = extract_input(event)?;

        let documents = self
            .index
            .search(&self.index_name, &query, self.top_k)
            .await?;
        tracing::info!(
            index = %self.index_name,
            count = documents.len(),
            "Retrieved context documents"
        );

        // Zero retrieved documents is not an error; the context block is
        // just empty.
        let context = documents
            .iter()
            .map(|scored| scored.document.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest {
            prompt: answer_prompt(&context, &query),
            params: self.params,
        };

        let body = self
            .model
            .complete(&request)
            .await?
            .ok_or(AppError::EmptyModelBody)?;

        let answer = body.answer_text().trim();
        if answer.is_empty() {
            return Err(AppError::EmptyOutput);
        }

        Ok(answer.to_string())
    }
}

#[async_trait]
impl FunctionHandler for CategoryHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: Value) -> FunctionResponse {
        match self.run(&event).await {
            Ok(answer) => FunctionResponse::ok(&json!({ "answer": answer })),
            Err(err) => {
                tracing::error!(function = %self.name, error = %err, "Answer generation failed");
                FunctionResponse::from_error(&err)
            }
        }
    }
}
