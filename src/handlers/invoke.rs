//! Function-to-function invocation over HTTP.

use crate::config::InvokerConfig;
use crate::handlers::FunctionInvoker;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Invokes functions through another host's `POST /invoke/{function}`
/// surface.
///
/// That surface flattens the envelope into the HTTP response (status from
/// `statusCode`, body from `body`), so the invoker rebuilds the envelope
/// from what comes back. A target that ran and failed is still `Ok` here;
/// only transport failures are errors.
pub struct HttpFunctionInvoker {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpFunctionInvoker {
    pub fn new(config: &InvokerConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FunctionInvoker for HttpFunctionInvoker {
    async fn invoke(&self, function: &str, payload: Value) -> Result<Value> {
        let url = format!("{}/invoke/{}", self.base_url, function);
        tracing::debug!(function = %function, url = %url, "Invoking function over HTTP");

        let response = self
            .http_client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Invocation(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Invocation(format!("Failed to read response body: {}", e)))?;

        Ok(json!({ "statusCode": status, "body": body }))
    }
}
