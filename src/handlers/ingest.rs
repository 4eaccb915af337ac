//! Document ingestion: object storage to vector indexes.

use crate::envelope::FunctionResponse;
use crate::handlers::FunctionHandler;
use crate::storage::ObjectStore;
use crate::types::{AppError, Document, Result};
use crate::vector::VectorIndex;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Only objects with this suffix are ingested.
pub const TEXT_SUFFIX: &str = ".txt";

/// One (object-prefix, index-name) pair the job walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSource {
    pub prefix: String,
    pub index: String,
}

impl IngestSource {
    pub fn new(prefix: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            index: index.into(),
        }
    }

    /// The static source table: one pair per category, walked in order.
    pub fn defaults() -> Vec<IngestSource> {
        vec![
            IngestSource::new("feature_docs/", "feature_index"),
            IngestSource::new("insight_docs/", "insight_index"),
            IngestSource::new("competitive_docs/", "competitive_index"),
        ]
    }
}

/// Counts for one complete job run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Documents added across all indexes.
    pub indexed: usize,
    /// Prefixes skipped because they held no matching documents.
    pub skipped: usize,
}

/// Walks the source table, loads text documents from object storage, and
/// bulk-indexes them.
///
/// The partial-failure policy is asymmetric on purpose: a prefix with no
/// matching documents is skipped with a warning, but the first hard failure
/// (listing, read, decode, indexing) aborts the remaining sources. Sources
/// already indexed stay indexed.
pub struct IngestionJob {
    name: String,
    store: Arc<dyn ObjectStore>,
    index: Arc<dyn VectorIndex>,
    sources: Vec<IngestSource>,
}

impl IngestionJob {
    pub fn new(
        name: impl Into<String>,
        store: Arc<dyn ObjectStore>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            name: name.into(),
            store,
            index,
            sources: IngestSource::defaults(),
        }
    }

    /// Replaces the source table. Tests and one-off backfills only.
    pub fn with_sources(mut self, sources: Vec<IngestSource>) -> Self {
        self.sources = sources;
        self
    }

    async fn load_source(&self, source: &IngestSource) -> Result<Vec<Document>> {
        let keys = self.store.list(&source.prefix).await?;

        let mut documents = Vec::new();
        for key in keys {
            if !key.ends_with(TEXT_SUFFIX) {
                continue;
            }
            let bytes = self.store.get(&key).await?;
            let content = String::from_utf8(bytes).map_err(|e| {
                AppError::Storage(format!("object '{}' is not valid UTF-8: {}", key, e))
            })?;
            documents.push(Document::new(content, key));
        }

        Ok(documents)
    }

    /// Runs the whole job, source by source.
    pub async fn run(&self) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for source in &self.sources {
            let documents = self.load_source(source).await?;
            if documents.is_empty() {
                tracing::warn!(prefix = %source.prefix, "No documents found, skipping");
                report.skipped += 1;
                continue;
            }

            let added = self.index.add_documents(&source.index, &documents).await?;
            tracing::info!(index = %source.index, count = added, "Indexed documents");
            report.indexed += added;
        }

        Ok(report)
    }
}

#[async_trait]
impl FunctionHandler for IngestionJob {
    fn name(&self) -> &str {
        &self.name
    }

    /// The event carries no input; invocation itself is the trigger.
    async fn handle(&self, _event: Value) -> FunctionResponse {
        match self.run().await {
            Ok(report) => {
                tracing::info!(
                    indexed = report.indexed,
                    skipped = report.skipped,
                    "Ingestion complete"
                );
                // The success body is a bare JSON string, not an object.
                FunctionResponse::ok(&json!("All embeddings pushed to the vector index"))
            }
            Err(err) => {
                tracing::error!(error = %err, "Ingestion failed");
                FunctionResponse::from_error(&err)
            }
        }
    }
}
