//! 数据模型
//!
//! 中继请求/响应及模型列表探测结果

pub mod ollama;
