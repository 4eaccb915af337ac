//! Scripted mocks for the pipeline's seams.
//!
//! Every trait the handlers depend on has a mock here: the two model
//! clients, the vector index, and function dispatch. Each mock returns a
//! scripted reply (or failure) and records the calls it receives so tests
//! can assert on routing and payloads.

use async_trait::async_trait;
use krino::llm::{CompletionBody, CompletionRequest};
use krino::{
    AppError, ChatModel, CompletionModel, Document, FunctionInvoker, Result, ScoredDocument,
    VectorIndex,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

// ============= Chat Model =============

/// Chat model returning a scripted classification reply.
pub struct MockChatModel {
    reply: String,
    should_fail: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockChatModel {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            should_fail: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            should_fail: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt the model was asked to complete, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.should_fail {
            return Err(AppError::Model("Mock chat failure".to_string()));
        }
        self.prompts.lock().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

// ============= Completion Model =============

/// Completion model returning a scripted reply body.
pub struct MockCompletionModel {
    reply: Option<CompletionBody>,
    should_fail: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionModel {
    /// Replies with the text in the `generation` field.
    pub fn answering(text: &str) -> Self {
        Self::with_body(CompletionBody::with_generation(text))
    }

    pub fn with_body(body: CompletionBody) -> Self {
        Self {
            reply: Some(body),
            should_fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replies without a body at all, the provider's empty-reply case.
    pub fn no_body() -> Self {
        Self {
            reply: None,
            should_fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            should_fail: true,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every generation request received, in order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CompletionModel for MockCompletionModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<CompletionBody>> {
        if self.should_fail {
            return Err(AppError::Model("Mock completion failure".to_string()));
        }
        self.requests.lock().push(request.clone());
        Ok(self.reply.clone())
    }
}

// ============= Vector Index =============

/// Vector index serving seeded results and recording every call.
pub struct MockVectorIndex {
    results: Vec<ScoredDocument>,
    should_fail: bool,
    searches: Mutex<Vec<(String, String, usize)>>,
    added: Mutex<Vec<(String, usize)>>,
}

impl MockVectorIndex {
    pub fn empty() -> Self {
        Self::with_results(Vec::new())
    }

    /// Seeds one result per content string, with descending scores.
    pub fn with_documents(contents: &[&str]) -> Self {
        let results = contents
            .iter()
            .enumerate()
            .map(|(rank, content)| ScoredDocument {
                document: Document::new(*content, format!("doc-{}.txt", rank)),
                score: 1.0 - 0.1 * rank as f32,
            })
            .collect();
        Self::with_results(results)
    }

    pub fn with_results(results: Vec<ScoredDocument>) -> Self {
        Self {
            results,
            should_fail: false,
            searches: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            results: Vec::new(),
            should_fail: true,
            searches: Mutex::new(Vec::new()),
            added: Mutex::new(Vec::new()),
        }
    }

    /// Every `(index, query, top_k)` search received, in order.
    pub fn searches(&self) -> Vec<(String, String, usize)> {
        self.searches.lock().clone()
    }

    /// Every `(index, document_count)` addition received, in order.
    pub fn added(&self) -> Vec<(String, usize)> {
        self.added.lock().clone()
    }
}

#[async_trait]
impl VectorIndex for MockVectorIndex {
    async fn search(&self, index: &str, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>> {
        if self.should_fail {
            return Err(AppError::Index("Mock index failure".to_string()));
        }
        self.searches
            .lock()
            .push((index.to_string(), query.to_string(), top_k));
        Ok(self.results.clone())
    }

    async fn add_documents(&self, index: &str, documents: &[Document]) -> Result<usize> {
        if self.should_fail {
            return Err(AppError::Index("Mock index failure".to_string()));
        }
        self.added.lock().push((index.to_string(), documents.len()));
        Ok(documents.len())
    }
}

// ============= Function Invoker =============

/// Invoker returning a scripted envelope and recording every dispatch.
pub struct MockInvoker {
    envelope: Value,
    should_fail: bool,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockInvoker {
    /// Replies with a well-formed 200 envelope carrying the answer.
    pub fn answering(answer: &str) -> Self {
        Self::returning(json!({
            "statusCode": 200,
            "body": json!({ "answer": answer }).to_string(),
        }))
    }

    pub fn returning(envelope: Value) -> Self {
        Self {
            envelope,
            should_fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            envelope: Value::Null,
            should_fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(function, payload)` dispatch received, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl FunctionInvoker for MockInvoker {
    async fn invoke(&self, function: &str, payload: Value) -> Result<Value> {
        if self.should_fail {
            return Err(AppError::Invocation("Mock dispatch failure".to_string()));
        }
        self.calls.lock().push((function.to_string(), payload));
        Ok(self.envelope.clone())
    }
}
