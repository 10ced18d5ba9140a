use serde::{Deserialize, Serialize};

use crate::models::intention::Intention;

/// 返回给调用方的唯一产物
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// 解析出的意图，序列化为原始名称
    pub intention: Intention,
    /// 模型生成的自然语言回复
    pub data: String,
}
