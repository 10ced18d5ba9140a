use serde::{Deserialize, Deserializer, Serialize};

use crate::models::intention::Intention;

/// 模型解析出的结构化查询
///
/// 字段名与发给模型的 JSON 约定一致；`alternative_collections` 和 `limit`
/// 缺失或为 `null` 时取默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuery {
    /// 意图
    pub intention: Intention,
    /// 查询值，含义随意图变化（通常是用户名）
    #[serde(rename = "value_to_search", default, deserialize_with = "null_as_default")]
    pub value: String,
    /// 目标集合
    pub collection: String,
    /// 集合无法识别时模型建议的替代集合
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternative_collections: Vec<String>,
    /// 结果条数上限，仅排序查询使用
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ResolvedQuery {
    pub fn new(intention: Intention, collection: &str) -> Self {
        Self {
            intention,
            value: String::new(),
            collection: collection.to_string(),
            alternative_collections: Vec::new(),
            limit: None,
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_alternatives(mut self, alternatives: &[&str]) -> Self {
        self.alternative_collections = alternatives.iter().map(|s| s.to_string()).collect();
        self
    }

    /// 模型建议的集合优先于原始集合
    pub fn effective_collection(&self) -> &str {
        self.alternative_collections
            .first()
            .map(String::as_str)
            .unwrap_or(self.collection.as_str())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
