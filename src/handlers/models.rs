//! 模型列表端点处理器 (/api/models)

use crate::backends::ollama::{self, MODEL_LIST_CANDIDATES};
use crate::config::Config;
use crate::error::{ProxyError, ProxyResult};
use crate::models::ollama::ModelsResponse;
use axum::{Extension, Json};
use reqwest::Client;
use std::sync::Arc;

pub async fn models_handler(
    Extension(config): Extension<Arc<Config>>,
    Extension(client): Extension<Client>,
) -> ProxyResult<Json<ModelsResponse>> {
    let result = ollama::list_models(&config, &client).await;

    if result.found {
        Ok(Json(ModelsResponse {
            models: result.models,
        }))
    } else {
        Err(ProxyError::ModelsUnavailable {
            tried: MODEL_LIST_CANDIDATES.to_vec(),
            errors: result.errors,
        })
    }
}
