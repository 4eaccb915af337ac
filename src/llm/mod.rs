//! Model clients for classification and answer generation.
//!
//! Two seams cover the pipeline's model traffic:
//! - [`ChatModel`] labels queries through an OpenAI-compatible chat endpoint.
//! - [`CompletionModel`] generates answers through a Llama-style invocation
//!   endpoint. Its reply body is optional by contract: an empty reply is
//!   `Ok(None)`, and callers decide whether that is an error.
//!
//! Both are constructed once at process start and shared for the process
//! lifetime.

/// Raw-HTTP client implementations.
pub mod http;
/// Fixed prompt templates for classification and answering.
pub mod prompts;

use crate::types::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::{HttpChatModel, HttpCompletionModel};

/// Chat-style model used for query classification.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generates a completion for a single user prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Completion-style model used for answer generation.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Runs one generation call. `Ok(None)` means the provider replied
    /// without a body.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<CompletionBody>>;
}

/// Fixed generation parameters for answer generation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GenerationParams {
    pub max_gen_len: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_gen_len: 512,
            temperature: 0.5,
            top_p: 0.9,
        }
    }
}

/// One answer-generation call: the full prompt plus its parameters.
/// Serializes to the exact invocation wire shape
/// (`prompt`/`max_gen_len`/`temperature`/`top_p`).
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub prompt: String,
    #[serde(flatten)]
    pub params: GenerationParams,
}

/// Decoded generation reply. Field naming is provider-dependent: some
/// endpoints expose `generation`, others `output`. Unrecognized fields are
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl CompletionBody {
    pub fn with_generation(text: impl Into<String>) -> Self {
        Self {
            generation: Some(text.into()),
            output: None,
        }
    }

    pub fn with_output(text: impl Into<String>) -> Self {
        Self {
            generation: None,
            output: Some(text.into()),
        }
    }

    /// Usable text under the field preference: a non-empty `generation`
    /// wins over `output`. The check runs before any trimming, so a
    /// whitespace-only `generation` still wins (and then fails the caller's
    /// empty check).
    pub fn answer_text(&self) -> &str {
        match (self.generation.as_deref(), self.output.as_deref()) {
            (Some(generation), _) if !generation.is_empty() => generation,
            (_, Some(output)) if !output.is_empty() => output,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_field_wins() {
        let body = CompletionBody {
            generation: Some("from generation".to_string()),
            output: Some("from output".to_string()),
        };
        assert_eq!(body.answer_text(), "from generation");
    }

    #[test]
    fn test_empty_generation_falls_back_to_output() {
        let body = CompletionBody {
            generation: Some(String::new()),
            output: Some("from output".to_string()),
        };
        assert_eq!(body.answer_text(), "from output");

        let body = CompletionBody::with_output("only output");
        assert_eq!(body.answer_text(), "only output");
    }

    #[test]
    fn test_whitespace_generation_shadows_output() {
        // Whitespace is non-empty, so it wins the preference and the caller
        // is left with nothing after trimming.
        let body = CompletionBody {
            generation: Some("   ".to_string()),
            output: Some("real answer".to_string()),
        };
        assert_eq!(body.answer_text(), "   ");
    }

    #[test]
    fn test_neither_field_present() {
        assert_eq!(CompletionBody::default().answer_text(), "");
    }

    #[test]
    fn test_completion_request_wire_shape() {
        let request = CompletionRequest {
            prompt: "p".to_string(),
            params: GenerationParams::default(),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["prompt"], "p");
        assert_eq!(value["max_gen_len"], 512);
        assert_eq!(value["temperature"], 0.5);
        assert_eq!(value["top_p"], 0.9);
    }

    #[test]
    fn test_unknown_reply_fields_are_ignored() {
        let body: CompletionBody = serde_json::from_str(
            r#"{"generation": "hi", "prompt_token_count": 12, "stop_reason": "stop"}"#,
        )
        .unwrap();
        assert_eq!(body.answer_text(), "hi");
    }
}
