//! 路由模块
//!
//! 组装 HTTP 端点与中间件

use crate::config::Config;
use crate::handlers;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use reqwest::Client;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build(config: Arc<Config>, client: Client) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/models", get(handlers::models_handler))
        // 聊天请求体不设上限，原样转发
        .route(
            "/api/chat",
            post(handlers::chat_handler).layer(DefaultBodyLimit::disable()),
        )
        .route("/health", get(health_handler))
        .layer(Extension(config))
        .layer(Extension(client))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_handler() -> &'static str {
    "OK"
}
