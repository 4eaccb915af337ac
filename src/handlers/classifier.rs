//! Query classification and forwarding to the matching category function.

use crate::config::RoutingConfig;
use crate::envelope::{cors_headers, extract_input, FunctionResponse};
use crate::handlers::{FunctionHandler, FunctionInvoker};
use crate::llm::prompts::classification_prompt;
use crate::llm::ChatModel;
use crate::types::{AppError, Category, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Static label -> function-name table.
///
/// `Unknown` has no function of its own; it rides the competitive route and
/// keeps its own label in the response.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pub feature: String,
    pub insight: String,
    pub competitive: String,
}

impl RouteTable {
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            feature: config.feature_function.clone(),
            insight: config.insight_function.clone(),
            competitive: config.competitive_function.clone(),
        }
    }

    pub fn target(&self, category: Category) -> &str {
        match category {
            Category::Feature => &self.feature,
            Category::Insight => &self.insight,
            Category::Competitive | Category::Unknown => &self.competitive,
        }
    }
}

/// Entry-point function: labels the query, forwards it to the category
/// function, and wraps the downstream answer together with the label.
///
/// Every response it produces carries the CORS headers for the configured
/// origin, errors included. The category functions do not do this; only
/// the classifier faces browsers.
pub struct ClassifierHandler {
    name: String,
    model: Arc<dyn ChatModel>,
    invoker: Arc<dyn FunctionInvoker>,
    routes: RouteTable,
    cors: HashMap<String, String>,
}

impl ClassifierHandler {
    pub fn new(
        name: impl Into<String>,
        model: Arc<dyn ChatModel>,
        invoker: Arc<dyn FunctionInvoker>,
        routes: RouteTable,
        allowed_origin: &str,
    ) -> Self {
        Self {
            name: name.into(),
            model,
            invoker,
            routes,
            cors: cors_headers(allowed_origin),
        }
    }

    async fn run(&self, event: &Value) -> Result<(Category, String)> {
        let query = extract_input(event)?;

        let raw = self.model.generate(&classification_prompt(&query)).await?;
        let category = Category::from_model_output(&raw)
            .ok_or_else(|| AppError::Model("Classifier returned empty output".to_string()))?;

        let target = self.routes.target(category);
        tracing::info!(category = %category, target = %target, "Classified query");

        // A missing route target is a wiring failure here, not a host 404.
        let payload = self
            .invoker
            .invoke(target, json!({ "input": query }))
            .await
            .map_err(|e| match e {
                AppError::UnknownFunction(name) => {
                    AppError::Invocation(format!("Function '{}' is not registered", name))
                }
                other => other,
            })?;
        let answer = unwrap_answer(target, &payload)?;

        Ok((category, answer))
    }
}

#[async_trait]
impl FunctionHandler for ClassifierHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: Value) -> FunctionResponse {
        let response = match self.run(&event).await {
            Ok((category, answer)) => FunctionResponse::ok(&json!({
                "category": category.as_str(),
                "answer": answer,
            })),
            Err(err) => {
                tracing::error!(error = %err, "Classification failed");
                FunctionResponse::from_error(&err)
            }
        };

        response.with_headers(self.cors.clone())
    }
}

/// Pulls the answer out of a forwarded function's envelope.
///
/// The envelope body defaults to `{}` when absent or not a string, so both
/// a missing body and a downstream error envelope surface the same way: as
/// a missing answer.
fn unwrap_answer(function: &str, payload: &Value) -> Result<String> {
    let raw = payload.get("body").and_then(Value::as_str).unwrap_or("{}");
    let body: Value = serde_json::from_str(raw).map_err(|e| {
        AppError::Invocation(format!("Function '{}' returned invalid JSON: {}", function, e))
    })?;

    body.get("answer")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::Invocation(format!("Function '{}' returned no answer", function)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> RouteTable {
        RouteTable {
            feature: "feature-inference".to_string(),
            insight: "insight-inference".to_string(),
            competitive: "competitive-inference".to_string(),
        }
    }

    #[test]
    fn test_route_targets() {
        let routes = routes();
        assert_eq!(routes.target(Category::Feature), "feature-inference");
        assert_eq!(routes.target(Category::Insight), "insight-inference");
        assert_eq!(
            routes.target(Category::Competitive),
            "competitive-inference"
        );
        assert_eq!(routes.target(Category::Unknown), "competitive-inference");
    }

    #[test]
    fn test_unwrap_answer_happy_path() {
        let payload = json!({
            "statusCode": 200,
            "body": "{\"answer\": \"shipping next quarter\"}",
        });
        assert_eq!(
            unwrap_answer("feature-inference", &payload).unwrap(),
            "shipping next quarter"
        );
    }

    #[test]
    fn test_unwrap_answer_missing_body_defaults_to_empty_object() {
        let payload = json!({ "statusCode": 200 });
        let err = unwrap_answer("feature-inference", &payload).unwrap_err();
        assert!(matches!(err, AppError::Invocation(_)));

        // A non-string body takes the same default and fails the same way.
        let payload = json!({ "statusCode": 200, "body": 7 });
        let err = unwrap_answer("feature-inference", &payload).unwrap_err();
        assert!(matches!(err, AppError::Invocation(_)));
    }

    #[test]
    fn test_unwrap_answer_error_envelope_surfaces_as_missing_answer() {
        let payload = json!({
            "statusCode": 500,
            "body": "{\"error\": \"Model returned empty output\"}",
        });
        let err = unwrap_answer("competitive-inference", &payload).unwrap_err();
        assert!(matches!(err, AppError::Invocation(_)));
    }

    #[test]
    fn test_unwrap_answer_rejects_non_string_answer() {
        let payload = json!({ "statusCode": 200, "body": "{\"answer\": 7}" });
        assert!(unwrap_answer("feature-inference", &payload).is_err());
    }

    #[test]
    fn test_unwrap_answer_rejects_unparseable_body() {
        let payload = json!({ "statusCode": 200, "body": "not json" });
        let err = unwrap_answer("feature-inference", &payload).unwrap_err();
        assert!(matches!(err, AppError::Invocation(_)));
    }
}
