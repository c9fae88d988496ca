//! 请求处理器模块
//!
//! 包含模型列表与聊天透传端点的处理器

pub mod chat;
pub mod models;

pub use chat::chat_handler;
pub use models::models_handler;
