//! Pipeline functions and the registry that hosts them.
//!
//! Every stage of the pipeline implements [`FunctionHandler`]: it takes an
//! invocation event and produces the shared response envelope, converting
//! its own failures into error envelopes along the way. Stages reach each
//! other through the [`FunctionInvoker`] seam, so the classifier behaves
//! identically whether its targets live in the same process or behind
//! another host's `/invoke` surface.

/// Retrieval-augmented answer handler, one per category.
pub mod category;
/// Query classification and routing.
pub mod classifier;
/// Document ingestion job.
pub mod ingest;
/// HTTP function-to-function invoker.
pub mod invoke;
/// Name-keyed handler registry, also the local invoker.
pub mod registry;

use crate::envelope::FunctionResponse;
use crate::types::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::env;

pub use category::CategoryHandler;
pub use classifier::{ClassifierHandler, RouteTable};
pub use ingest::{IngestReport, IngestSource, IngestionJob};
pub use invoke::HttpFunctionInvoker;
pub use registry::FunctionRegistry;

/// A named pipeline function.
///
/// `handle` is infallible by construction: failures become error envelopes,
/// so every caller sees the same `statusCode`/`body` shape either way.
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    fn name(&self) -> &str;

    async fn handle(&self, event: Value) -> FunctionResponse;
}

/// Function-to-function dispatch.
///
/// Returns the target's response envelope as JSON. `Err` covers dispatch
/// failures only (unknown target, transport); a target that ran and failed
/// still comes back as `Ok` with an error envelope inside.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    async fn invoke(&self, function: &str, payload: Value) -> Result<Value>;
}

/// How the classifier reaches its downstream functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvokerMode {
    #[default]
    Local,
    Http,
}

impl InvokerMode {
    /// Reads `INVOKER_MODE`. Unrecognized values fall back to the default.
    pub fn from_env() -> Self {
        match env::var("INVOKER_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "http" | "remote" => InvokerMode::Http,
            "" | "local" => InvokerMode::Local,
            other => {
                tracing::warn!(mode = %other, "Unknown invoker mode, defaulting to local");
                InvokerMode::Local
            }
        }
    }
}
