//! Invocation envelope: request-event query extraction and the
//! `statusCode`/`headers`/`body` response shape shared by every function.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

// ============= CORS =============

pub const CORS_ALLOWED_HEADERS: &str = "Content-Type";
pub const CORS_ALLOWED_METHODS: &str = "OPTIONS,POST";

/// The three fixed CORS headers for a configured origin.
pub fn cors_headers(origin: &str) -> HashMap<String, String> {
    HashMap::from([
        (
            "Access-Control-Allow-Origin".to_string(),
            origin.to_string(),
        ),
        (
            "Access-Control-Allow-Headers".to_string(),
            CORS_ALLOWED_HEADERS.to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            CORS_ALLOWED_METHODS.to_string(),
        ),
    ])
}

// ============= Request Extraction =============

/// Extracts the query string from a request event.
///
/// Accepts all three payload shapes uniformly, in priority order:
/// 1. `body` holding string-encoded JSON (parsed),
/// 2. `body` holding an already-structured object,
/// 3. the whole event as the body (covers a top-level `input` field).
///
/// The extracted field is always `input`, trimmed. An empty or missing
/// input is a validation failure; a string body that does not parse as
/// JSON is a server-class failure, not a 400.
pub fn extract_input(event: &Value) -> Result<String> {
    let parsed;
    let body = match event.get("body") {
        Some(Value::String(raw)) => {
            parsed = serde_json::from_str::<Value>(raw)
                .map_err(|e| AppError::InvalidBody(e.to_string()))?;
            &parsed
        }
        Some(body @ Value::Object(_)) => body,
        _ => event,
    };

    let input = body
        .get("input")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();

    if input.is_empty() {
        return Err(AppError::MissingInput);
    }

    Ok(input.to_string())
}

// ============= Response Envelope =============

/// The response envelope every function produces. `body` is always a
/// JSON-encoded string, mirroring proxy-integration conventions; `headers`
/// is omitted from serialization entirely when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    pub body: String,
}

impl FunctionResponse {
    /// 200 with the payload JSON-encoded into the body.
    pub fn ok(payload: &Value) -> Self {
        Self {
            status_code: 200,
            headers: None,
            body: payload.to_string(),
        }
    }

    /// An error envelope with `{"error": message}` as the body.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            headers: None,
            body: json!({ "error": message }).to_string(),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::error(err.status_code(), &err.to_string())
    }

    /// Attaches a header map, replacing any existing one.
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Decodes the body string back into JSON.
    pub fn body_json(&self) -> Result<Value> {
        serde_json::from_str(&self.body)
            .map_err(|e| AppError::Invocation(format!("envelope body is not JSON: {}", e)))
    }
}

impl axum::response::IntoResponse for FunctionResponse {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code)
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response();

        // Envelope headers that are not valid HTTP headers are dropped.
        if let Some(headers) = self.headers {
            let header_map = response.headers_mut();
            for (name, value) in headers {
                if let (Ok(name), Ok(value)) = (
                    axum::http::HeaderName::from_bytes(name.as_bytes()),
                    axum::http::HeaderValue::from_str(&value),
                ) {
                    header_map.insert(name, value);
                }
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::string_body(json!({ "body": "{\"input\": \"roadmap gaps\"}" }))]
    #[case::object_body(json!({ "body": { "input": "roadmap gaps" } }))]
    #[case::top_level(json!({ "input": "roadmap gaps" }))]
    fn test_all_payload_shapes_extract_identically(#[case] event: Value) {
        assert_eq!(extract_input(&event).unwrap(), "roadmap gaps");
    }

    #[test]
    fn test_extracted_input_is_trimmed() {
        let event = json!({ "input": "  padded query \n" });
        assert_eq!(extract_input(&event).unwrap(), "padded query");
    }

    #[test]
    fn test_empty_and_whitespace_input_is_rejected() {
        for event in [
            json!({ "input": "" }),
            json!({ "input": "   " }),
            json!({ "body": { "input": "\t\n" } }),
            json!({ "body": "{\"input\": \"\"}" }),
            json!({}),
        ] {
            let err = extract_input(&event).unwrap_err();
            assert!(matches!(err, AppError::MissingInput), "event: {event}");
        }
    }

    #[test]
    fn test_non_string_input_is_rejected() {
        let event = json!({ "input": 42 });
        assert!(matches!(
            extract_input(&event).unwrap_err(),
            AppError::MissingInput
        ));
    }

    #[test]
    fn test_unparseable_string_body_is_a_server_failure() {
        let event = json!({ "body": "not json" });
        assert!(matches!(
            extract_input(&event).unwrap_err(),
            AppError::InvalidBody(_)
        ));
    }

    #[test]
    fn test_non_object_body_falls_back_to_the_event() {
        let event = json!({ "body": 7, "input": "still here" });
        assert_eq!(extract_input(&event).unwrap(), "still here");
    }

    #[test]
    fn test_ok_envelope_serialization() {
        let response = FunctionResponse::ok(&json!({ "answer": "X" }));
        let serialized = serde_json::to_value(&response).unwrap();

        assert_eq!(serialized["statusCode"], 200);
        assert_eq!(serialized["body"], "{\"answer\":\"X\"}");
        assert!(
            serialized.get("headers").is_none(),
            "headers must be omitted entirely when absent"
        );
    }

    #[test]
    fn test_error_envelope_body() {
        let response = FunctionResponse::from_error(&AppError::MissingInput);
        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body_json().unwrap(),
            json!({ "error": "Missing 'input' in request body" })
        );
    }

    #[test]
    fn test_headers_survive_serialization_round_trip() {
        let response =
            FunctionResponse::ok(&json!({ "answer": "X" })).with_headers(cors_headers("http://ui.local"));

        let value = serde_json::to_value(&response).unwrap();
        let decoded: FunctionResponse = serde_json::from_value(value).unwrap();
        let headers = decoded.headers.unwrap();

        assert_eq!(headers["Access-Control-Allow-Origin"], "http://ui.local");
        assert_eq!(headers["Access-Control-Allow-Headers"], "Content-Type");
        assert_eq!(headers["Access-Control-Allow-Methods"], "OPTIONS,POST");
    }

    #[test]
    fn test_cors_headers_contents() {
        let headers = cors_headers("http://ui.local");
        assert_eq!(headers.len(), 3);
        assert_eq!(headers["Access-Control-Allow-Origin"], "http://ui.local");
    }
}
