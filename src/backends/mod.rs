//! 后端模块
//!
//! 负责与 Ollama 兼容 API 的通信

pub mod ollama;
