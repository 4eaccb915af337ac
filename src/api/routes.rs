use crate::envelope::FunctionResponse;
use crate::types::{AppError, Result};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// Builds the two-route router over shared [`AppState`].
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/invoke/{function}", post(invoke_function))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness plus the function names currently served.
async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "functions": state.registry.names(),
    }))
}

/// Dispatches an invocation event to the named function.
///
/// The function's envelope is flattened into the HTTP response: its status
/// code becomes the response status, its body the response body, and its
/// headers are merged in. An unregistered name is the host's own 404; it
/// never reaches a function.
async fn invoke_function(
    State(state): State<AppState>,
    Path(function): Path<String>,
    Json(event): Json<Value>,
) -> Result<FunctionResponse> {
    let handler = state
        .registry
        .get(&function)
        .ok_or_else(|| AppError::UnknownFunction(function.clone()))?;

    tracing::debug!(function = %function, "Dispatching invocation");
    Ok(handler.handle(event).await)
}
