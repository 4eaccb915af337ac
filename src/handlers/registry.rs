//! Name-keyed function registry and in-process dispatch.

use crate::handlers::{FunctionHandler, FunctionInvoker};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of every function the host serves, keyed by name.
///
/// Doubles as the local [`FunctionInvoker`]: in-process dispatch hands back
/// exactly the envelope an HTTP hop to the same function would.
#[derive(Default)]
pub struct FunctionRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn FunctionHandler>>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under its own name, replacing any previous one.
    pub fn register(&self, handler: Arc<dyn FunctionHandler>) {
        let name = handler.name().to_string();
        tracing::debug!(function = %name, "Registered function");
        self.handlers.write().insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FunctionHandler>> {
        self.handlers.read().get(name).cloned()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.handlers.read().contains_key(name)
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.read().keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl FunctionInvoker for FunctionRegistry {
    async fn invoke(&self, function: &str, payload: Value) -> Result<Value> {
        // Clone the handler out so the lock is not held across the await.
        let handler = self
            .get(function)
            .ok_or_else(|| AppError::UnknownFunction(function.to_string()))?;

        let response = handler.handle(payload).await;
        serde_json::to_value(&response)
            .map_err(|e| AppError::Invocation(format!("Failed to encode envelope: {}", e)))
    }
}
