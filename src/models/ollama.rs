use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Used when the chat request omits `max_tokens`.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Inbound chat request from the web UI.
///
/// Fields are kept as raw JSON values so whatever the client sends, `null`
/// included, is forwarded untouched; only absent fields are replaced with defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub prompt: Option<Value>,
    pub model: Option<Value>,
    pub max_tokens: Option<Value>,
}

impl ChatRequest {
    /// Permissive decode: anything that is not a JSON object yields an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(mut fields)) => Self {
                prompt: fields.remove("prompt"),
                model: fields.remove("model"),
                max_tokens: fields.remove("max_tokens"),
            },
            _ => Self::default(),
        }
    }

    pub fn into_payload(self, default_model: &str) -> GeneratePayload {
        GeneratePayload {
            model: self
                .model
                .unwrap_or_else(|| Value::String(default_model.to_string())),
            prompt: self.prompt.unwrap_or_else(|| Value::String(String::new())),
            max_tokens: self
                .max_tokens
                .unwrap_or_else(|| Value::from(DEFAULT_MAX_TOKENS)),
        }
    }
}

/// Body POSTed to the backend generate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratePayload {
    pub model: Value,
    pub prompt: Value,
    pub max_tokens: Value,
}

/// What went wrong with one candidate listing path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProbeOutcome {
    Status(u16),
    Message(String),
}

/// Diagnostic entry, serialized as a `[url, status_or_message]` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeFailure(pub String, pub ProbeOutcome);

impl ProbeFailure {
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self(url.into(), ProbeOutcome::Status(status))
    }

    pub fn message(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self(url.into(), ProbeOutcome::Message(message.into()))
    }
}

/// Result of probing the candidate listing paths.
///
/// `found` implies `models` is non-empty, free of empty strings and duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelListResult {
    pub models: Vec<String>,
    pub found: bool,
    pub errors: Vec<ProbeFailure>,
}

impl ModelListResult {
    pub fn found(models: Vec<String>) -> Self {
        debug_assert!(!models.is_empty());
        Self {
            models,
            found: true,
            errors: Vec::new(),
        }
    }

    pub fn not_found(errors: Vec<ProbeFailure>) -> Self {
        Self {
            models: Vec::new(),
            found: false,
            errors,
        }
    }
}

/// `GET /api/models` success body.
#[derive(Debug, Clone, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

/// Backend response echoed back to the client as-is.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub body: Bytes,
    pub status: StatusCode,
    pub content_type: HeaderValue,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        response.headers_mut().insert(CONTENT_TYPE, self.content_type);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_defaults() {
        let payload = ChatRequest::from_body(br#"{"prompt":"hi"}"#).into_payload("my-model");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"model": "my-model", "prompt": "hi", "max_tokens": 512})
        );
    }

    #[test]
    fn test_chat_request_passes_values_through() {
        let body = br#"{"prompt":"hi","model":"llama3","max_tokens":"lots","extra":true}"#;
        let payload = ChatRequest::from_body(body).into_payload("my-model");
        assert_eq!(payload.model, json!("llama3"));
        assert_eq!(payload.max_tokens, json!("lots"));
    }

    #[test]
    fn test_chat_request_malformed_body() {
        assert_eq!(ChatRequest::from_body(b"not json"), ChatRequest::default());
        assert_eq!(ChatRequest::from_body(b""), ChatRequest::default());
        assert_eq!(ChatRequest::from_body(br#"["hi","llama3",1]"#), ChatRequest::default());

        let payload = ChatRequest::from_body(b"{").into_payload("fallback");
        assert_eq!(payload.prompt, json!(""));
        assert_eq!(payload.model, json!("fallback"));
        assert_eq!(payload.max_tokens, json!(512));
    }

    #[test]
    fn test_null_fields_are_forwarded() {
        let payload =
            ChatRequest::from_body(br#"{"prompt":"hi","model":null}"#).into_payload("my-model");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"model": null, "prompt": "hi", "max_tokens": 512})
        );

        let payload = ChatRequest::from_body(br#"{"max_tokens":null}"#).into_payload("m");
        assert_eq!(payload.max_tokens, Value::Null);
        assert_eq!(payload.model, json!("m"));
    }

    #[test]
    fn test_probe_failure_serializes_as_pair() {
        let errors = vec![
            ProbeFailure::status("http://h:1/api/models", 404),
            ProbeFailure::message("http://h:1/list", "connection refused"),
        ];
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!([["http://h:1/api/models", 404], ["http://h:1/list", "connection refused"]])
        );
    }

    #[test]
    fn test_relayed_response_preserves_status_and_type() {
        let relayed = RelayedResponse {
            body: Bytes::from_static(b"oops"),
            status: StatusCode::SERVICE_UNAVAILABLE,
            content_type: HeaderValue::from_static("text/plain"),
        };
        let response = relayed.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
    }
}
