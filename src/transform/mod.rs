//! 响应归一化模块
//!
//! 将后端各种形状的模型列表响应统一为有序、去重的模型名列表

pub mod model_list;
pub mod utils;

// 重新导出常用函数
pub use model_list::extract_model_names;
