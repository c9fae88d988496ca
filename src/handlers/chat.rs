//! 聊天端点处理器 (/api/chat)

use crate::backends::ollama;
use crate::config::Config;
use crate::error::ProxyResult;
use crate::models::ollama::{ChatRequest, RelayedResponse};
use axum::Extension;
use reqwest::Client;
use std::sync::Arc;

/// 宽松解析请求体：非法 JSON 不报错，直接使用默认值
pub async fn chat_handler(
    Extension(config): Extension<Arc<Config>>,
    Extension(client): Extension<Client>,
    body: axum::body::Bytes,
) -> ProxyResult<RelayedResponse> {
    let payload = ChatRequest::from_body(&body).into_payload(&config.default_model);

    tracing::debug!("Received chat request for model: {}", payload.model);

    if config.debug && config.log_raw_json {
        tracing::debug!(
            "Generate payload: {}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    }

    if config.verbose {
        tracing::trace!("Raw chat body: {}", String::from_utf8_lossy(&body));
    }

    ollama::relay_chat(&config, &client, &payload).await
}
