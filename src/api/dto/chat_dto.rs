//! 对话 DTO
//!
//! 定义检索接口的请求数据结构。响应直接使用 [`crate::models::chat::ChatResponse`]。

use serde::{Deserialize, Serialize};

/// 检索请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// 用户的自然语言指令
    pub message: String,
}
