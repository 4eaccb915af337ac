//! Core types shared across the pipeline: category labels, documents,
//! and the application error type.

use serde::{Deserialize, Serialize};

// ============= Category Labels =============

/// Query categories plus the routing fallback.
///
/// `Unknown` is a legal, user-visible classification result; it shares the
/// competitive handler's route but keeps its own label in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Feature,
    Insight,
    Competitive,
    Unknown,
}

impl Category {
    /// The labels a classification model may answer with.
    /// `Unknown` is not one of them.
    pub const LABELS: [Category; 3] = [
        Category::Feature,
        Category::Insight,
        Category::Competitive,
    ];

    /// Resolves raw model output to a label.
    ///
    /// Takes the first whitespace-delimited token and matches it
    /// case-insensitively against the label set; any other token (including
    /// ones with trailing punctuation, e.g. "Feature.") collapses to
    /// [`Category::Unknown`]. Returns `None` when the output has no token
    /// at all.
    pub fn from_model_output(raw: &str) -> Option<Category> {
        let token = raw.split_whitespace().next()?;
        Some(
            Self::LABELS
                .into_iter()
                .find(|label| token.eq_ignore_ascii_case(label.as_str()))
                .unwrap_or(Category::Unknown),
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Feature => "Feature",
            Category::Insight => "Insight",
            Category::Competitive => "Competitive",
            Category::Unknown => "Unknown",
        }
    }

    /// Vector index backing this category. The fallback shares the
    /// competitive index, mirroring its route.
    pub fn index_name(&self) -> &'static str {
        match self {
            Category::Feature => "feature_index",
            Category::Insight => "insight_index",
            Category::Competitive | Category::Unknown => "competitive_index",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============= Documents =============

/// A unit of ingested content: the text plus the object key it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub source: String,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }
}

/// A retrieved document together with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or empty query. The display string is part of the wire
    /// contract and must not change.
    #[error("Missing 'input' in request body")]
    MissingInput,

    /// A string request body that is not valid JSON.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Model error: {0}")]
    Model(String),

    /// The generation call replied with no body to parse.
    #[error("Model returned no response body")]
    EmptyModelBody,

    /// The generation reply parsed but carried no usable text.
    #[error("Model returned empty output")]
    EmptyOutput,

    #[error("Vector index error: {0}")]
    Index(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invocation error: {0}")]
    Invocation(String),

    /// No handler registered under the requested name. Host surface only;
    /// never appears inside a function envelope.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error maps to, both inside envelopes and on the
    /// host surface.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::MissingInput => 400,
            AppError::UnknownFunction(_) => 404,
            _ => 500,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
