//! # Krino
//!
//! A query triage pipeline for product teams: classifies product-manager
//! queries into Feature, Insight, or Competitive and answers them with
//! category-scoped retrieval-augmented generation.
//!
//! ## Overview
//!
//! Krino can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `krino-server` binary
//! 2. **As a library** - Wire the handlers into your own Rust project
//!
//! The pipeline is three kinds of function behind one response envelope:
//!
//! - The **classifier** labels a query with a chat model, forwards it to the
//!   matching category function, and relays the answer together with the
//!   label.
//! - Three **category functions** (feature, insight, competitive) each
//!   retrieve top-K context from their own vector index and generate an
//!   answer with a completion model.
//! - The **ingestion job** loads text documents from object storage and
//!   bulk-indexes them, one object prefix per category.
//!
//! Every function produces the same `statusCode`/`headers`/`body` envelope,
//! so in-process dispatch and the HTTP `/invoke` surface are
//! interchangeable.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use krino::{AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let state = AppState::from_config(config);
//!
//!     let server = state.config.server.clone();
//!     krino::api::serve(&server, state).await?;
//!     Ok(())
//! }
//! ```
//!
//! Individual functions can also be invoked without the HTTP surface:
//!
//! ```rust,ignore
//! use krino::handlers::FunctionHandler;
//! use serde_json::json;
//!
//! let classifier = state.registry.get("classifier").unwrap();
//! let response = classifier.handle(json!({ "input": "why did churn spike?" })).await;
//! assert_eq!(response.status_code, 200);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - HTTP surface (`/health`, `/invoke/{function}`)
//! - [`config`] - environment-driven configuration
//! - [`envelope`] - request extraction and the response envelope
//! - [`handlers`] - the pipeline functions and their registry
//! - [`llm`] - chat and completion model clients
//! - [`storage`] - object store backends
//! - [`types`] - category labels, documents, errors
//! - [`vector`] - vector index backends and embeddings
//!
//! ## Architecture
//!
//! Handlers never construct their own backends. Every client (models,
//! embeddings, vector index, object store) is built once in
//! [`AppState::from_config`] and injected, living for the process lifetime.
//! Swapping a backend is a configuration change, not a code change.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP surface: routes and server bootstrap.
pub mod api;
/// Environment-driven configuration.
pub mod config;
/// Invocation envelope: extraction, response shape, CORS headers.
pub mod envelope;
/// Pipeline functions and the registry that hosts them.
pub mod handlers;
/// Model clients for classification and answer generation.
pub mod llm;
/// Object storage backends.
pub mod storage;
/// Core types (categories, documents, errors).
pub mod types;
/// Vector index backends and embeddings.
pub mod vector;

// Re-export commonly used types
pub use config::Config;
pub use envelope::{extract_input, FunctionResponse};
pub use handlers::{
    CategoryHandler, ClassifierHandler, FunctionHandler, FunctionInvoker, FunctionRegistry,
    HttpFunctionInvoker, IngestionJob, InvokerMode, RouteTable,
};
pub use llm::{ChatModel, CompletionModel};
pub use storage::ObjectStore;
pub use types::{AppError, Category, Document, Result, ScoredDocument};
pub use vector::{EmbeddingClient, VectorIndex};

use crate::llm::{HttpChatModel, HttpCompletionModel};
use crate::vector::HttpEmbeddingClient;
use std::sync::Arc;

/// Application state shared across the HTTP surface.
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration, fixed for the process lifetime.
    pub config: Arc<Config>,
    /// Every function the host serves, keyed by name.
    pub registry: Arc<FunctionRegistry>,
    /// The ingestion job, also runnable without the HTTP surface.
    pub ingest: Arc<IngestionJob>,
}

impl AppState {
    /// Builds every backend and handler from configuration and registers
    /// them.
    ///
    /// Clients are constructed once here and shared for the process
    /// lifetime. In local invoker mode the registry itself is the
    /// classifier's invoker, so a query never leaves the process; in http
    /// mode the classifier calls out through `/invoke/{function}`.
    pub fn from_config(config: Config) -> Self {
        let embedder: Arc<dyn EmbeddingClient> =
            Arc::new(HttpEmbeddingClient::new(&config.vector));
        let index = config.vector.backend.create(&config.vector, embedder);
        let store = config.storage.backend.create(&config.storage);

        let chat: Arc<dyn ChatModel> = Arc::new(HttpChatModel::new(&config.model));
        let completion: Arc<dyn CompletionModel> =
            Arc::new(HttpCompletionModel::new(&config.model));

        let registry = Arc::new(FunctionRegistry::new());

        for (function, category) in [
            (&config.routing.feature_function, Category::Feature),
            (&config.routing.insight_function, Category::Insight),
            (&config.routing.competitive_function, Category::Competitive),
        ] {
            registry.register(Arc::new(CategoryHandler::new(
                function.clone(),
                category.index_name(),
                config.vector.top_k,
                Arc::clone(&index),
                Arc::clone(&completion),
                config.model.generation,
            )));
        }

        let ingest = Arc::new(IngestionJob::new(
            config.routing.ingest_function.clone(),
            store,
            Arc::clone(&index),
        ));
        registry.register(Arc::clone(&ingest) as Arc<dyn FunctionHandler>);

        let invoker: Arc<dyn FunctionInvoker> = match config.invoker.mode {
            InvokerMode::Local => Arc::clone(&registry) as Arc<dyn FunctionInvoker>,
            InvokerMode::Http => Arc::new(HttpFunctionInvoker::new(&config.invoker)),
        };

        registry.register(Arc::new(ClassifierHandler::new(
            config.routing.classifier_function.clone(),
            chat,
            invoker,
            RouteTable::from_config(&config.routing),
            &config.routing.allowed_origin,
        )));

        Self {
            config: Arc::new(config),
            registry,
            ingest,
        }
    }
}
