//! Ollama 后端
//!
//! 模型列表探测与生成请求透传

use crate::config::Config;
use crate::error::ProxyResult;
use crate::models::ollama::{GeneratePayload, ModelListResult, ProbeFailure, RelayedResponse};
use crate::transform;
use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use reqwest::Client;
use std::time::Duration;

/// 依次尝试的模型列表路径
pub const MODEL_LIST_CANDIDATES: &[&str] = &["/api/models", "/api/list", "/models", "/list"];

const FALLBACK_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// 按顺序探测候选路径，首个返回非空列表的路径胜出，其后的路径不再请求
pub async fn list_models(config: &Config, client: &Client) -> ModelListResult {
    let mut errors = Vec::new();

    for candidate in MODEL_LIST_CANDIDATES {
        let url = config.backend.url(candidate);

        match probe_candidate(client, &url, config.backend.probe_timeout).await {
            Ok(models) if !models.is_empty() => {
                tracing::debug!("Found {} models at {}", models.len(), url);
                return ModelListResult::found(models);
            }
            Ok(_) => {
                tracing::warn!("No models in response from {}", url);
                errors.push(ProbeFailure::message(url, "no models in response"));
            }
            Err(failure) => errors.push(failure),
        }
    }

    tracing::error!(
        "Unable to list models from {} ({} candidates tried)",
        config.backend.base_url(),
        errors.len()
    );
    ModelListResult::not_found(errors)
}

async fn probe_candidate(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Vec<String>, ProbeFailure> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Probe {} failed: {}", url, e);
            ProbeFailure::message(url, e.to_string())
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        tracing::warn!("Probe {} returned {}", url, status);
        return Err(ProbeFailure::status(url, status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = response.text().await.map_err(|e| {
        tracing::warn!("Failed to read body from {}: {}", url, e);
        ProbeFailure::message(url, e.to_string())
    })?;

    Ok(transform::extract_model_names(&content_type, &body))
}

/// 将生成请求转发到后端，原样返回响应体、状态码与 Content-Type
pub async fn relay_chat(
    config: &Config,
    client: &Client,
    payload: &GeneratePayload,
) -> ProxyResult<RelayedResponse> {
    let url = config.backend.generate_url();

    tracing::debug!("Forwarding chat request to {}", url);

    let response = client
        .post(&url)
        .json(payload)
        .timeout(config.backend.generate_timeout)
        .send()
        .await
        .inspect_err(|e| tracing::error!("Failed to reach {}: {}", url, e))?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));

    let body = response
        .bytes()
        .await
        .inspect_err(|e| tracing::error!("Failed to read response from {}: {}", url, e))?;

    tracing::debug!("Backend responded {} ({} bytes)", status, body.len());

    Ok(RelayedResponse {
        body,
        status,
        content_type,
    })
}
