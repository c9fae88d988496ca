use crate::models::ollama::ProbeFailure;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-specific errors
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to reach Ollama API: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Unable to list models")]
    ModelsUnavailable {
        tried: Vec<&'static str>,
        errors: Vec<ProbeFailure>,
    },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match self {
            ProxyError::Unreachable(err) => json!({
                "error": "Failed to reach Ollama API",
                "detail": err.to_string(),
            }),
            ProxyError::ModelsUnavailable { tried, errors } => json!({
                "models": [],
                "error": "Unable to list models",
                "tried": tried,
                "errors": errors,
            }),
        };

        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

/// Result type for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;
