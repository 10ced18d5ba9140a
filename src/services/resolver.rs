//! 意图解析服务
//!
//! 请语言模型以 JSON 对象的形式返回结构化查询，把自然语言指令转换为 [`ResolvedQuery`]。

use std::sync::{Arc, LazyLock};

use tracing::{debug, info};

use crate::error::{LlmError, ResolutionError};
use crate::llm::{ChatMessage, LanguageModel, ResponseFormat};
use crate::models::intention::Intention;
use crate::models::query::ResolvedQuery;

/// 解析阶段的系统提示，列出全部已知意图
pub static RESOLVER_DIRECTIVE: LazyLock<String> = LazyLock::new(|| {
    let intentions = Intention::KNOWN
        .iter()
        .map(|i| format!("'{}'", i.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the user instruction to identify the intention and any potential record limit. \
         The intention can be one of {intentions}. \
         The valid collections are 'followers', 'followings' and 'likes'. \
         If the instruction refers to a collection that does not exist, such as 'users', do not fail: \
         fill 'alternative_collections' with the valid collections where the information might be found. \
         If a limit is specified, return it in 'limit'. \
         Return the response as a JSON object comprising the fields: \
         intention, collection, alternative_collections, value_to_search, and limit."
    )
});

/// 包装用户指令作为用户消息
pub fn user_prompt(instruction: &str) -> String {
    format!(
        "Instruction: '{}'. If the mentioned collection doesn't exist, suggest where the \
         information might be found within the valid collections, and provide the response \
         in the specified JSON format.",
        instruction
    )
}

/// 把模型回复解码为查询，可选字段缺失不算错误
pub fn decode(content: &str) -> Result<ResolvedQuery, ResolutionError> {
    serde_json::from_str(content).map_err(|e| ResolutionError::MalformedModelOutput(e.to_string()))
}

/// 意图解析器
pub struct QueryResolver {
    model: Arc<dyn LanguageModel>,
}

impl QueryResolver {
    /// 创建意图解析器
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// 解析一条指令
    ///
    /// 模型不可达时返回 `UpstreamUnavailable`，没有候选或输出无法解码时返回
    /// `MalformedModelOutput`。
    pub async fn resolve(&self, instruction: &str) -> Result<ResolvedQuery, ResolutionError> {
        let messages = vec![
            ChatMessage::system(RESOLVER_DIRECTIVE.as_str()),
            ChatMessage::user(user_prompt(instruction)),
        ];

        let replies = self
            .model
            .exchange(messages, ResponseFormat::JsonObject)
            .await
            .map_err(upstream)?;

        let content = replies.into_iter().next().ok_or_else(|| {
            ResolutionError::MalformedModelOutput("model returned no choices".to_string())
        })?;
        debug!("resolution output: {}", content);

        let query = decode(&content)?;
        info!(
            intention = %query.intention,
            collection = %query.collection,
            alternatives = ?query.alternative_collections,
            limit = ?query.limit,
            "instruction resolved"
        );

        Ok(query)
    }
}

fn upstream(err: LlmError) -> ResolutionError {
    ResolutionError::UpstreamUnavailable(err.to_string())
}
