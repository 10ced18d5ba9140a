//! 回复生成服务
//!
//! 按意图选择提示模板，嵌入分发结果，再请语言模型生成面向用户的回复。

use std::sync::Arc;

use tracing::debug;

use crate::error::CompositionError;
use crate::llm::{ChatMessage, LanguageModel, ResponseFormat};
use crate::models::dispatch::{DispatchFailure, DispatchPayload, DispatchResult};
use crate::models::intention::Intention;

pub const COMPOSER_DIRECTIVE: &str = "You are a helpful assistant for someone exploring their own \
    Instagram data. Compose a concise, user-friendly response to the request described below, \
    using only the data provided. Do not invent records.";

/// 每个意图的请求描述，无法识别的意图共用通用模板
pub fn template_for(intention: &Intention) -> &'static str {
    match intention {
        Intention::FindAllLikes => "The user asked to see every post they have liked.",
        Intention::FindLikesByUsername => {
            "The user asked which posts they liked from one particular account."
        }
        Intention::FindAllFollowers => "The user asked for the full list of their followers.",
        Intention::FindAllFollowings => {
            "The user asked for the full list of accounts they follow."
        }
        Intention::FindLikesSortedByDate => {
            "The user asked for their most recent likes, newest first, limited to a number of records."
        }
        Intention::FindFollowersByUsername => {
            "The user asked whether a particular account follows them."
        }
        Intention::FindFollowingsByUsername => {
            "The user asked whether they follow a particular account."
        }
        Intention::Unrecognized(_) => {
            "The user's request could not be matched to any supported question about their likes, \
             followers or followings."
        }
    }
}

/// 构造回复生成请求的用户消息
pub fn build_prompt(result: &DispatchResult) -> String {
    let request = template_for(&result.intention);
    let intention = &result.intention;

    match &result.payload {
        DispatchPayload::Records(records) if records.is_empty() => format!(
            "{} Intention: {}. The query returned no records. Tell the user nothing was found.",
            request, intention
        ),
        DispatchPayload::Records(records) => format!(
            "{} Intention: {}. Here are the {} matching records as JSON: {}",
            request,
            intention,
            records.len(),
            records.render()
        ),
        DispatchPayload::Failure(DispatchFailure::UnknownIntention) => format!(
            "{} The detected intention was '{}'. Tell the user their request was not understood \
             and suggest asking about their likes, followers or followings.",
            request, intention
        ),
        DispatchPayload::Failure(failure) => format!(
            "{} Intention: {}. The data could not be retrieved: {}. Tell the user the {} request \
             failed and include this error description.",
            request, intention, failure, intention
        ),
    }
}

/// 回复生成器
pub struct ReplyComposer {
    model: Arc<dyn LanguageModel>,
}

impl ReplyComposer {
    /// 创建回复生成器
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// 生成回复，原样返回模型的第一个候选
    ///
    /// 没有候选或第一个候选为空白时返回 [`CompositionError::EmptyReply`]。
    pub async fn compose(&self, result: &DispatchResult) -> Result<String, CompositionError> {
        let prompt = build_prompt(result);
        debug!(intention = %result.intention, "composition prompt: {}", prompt);

        let replies = self
            .model
            .exchange(
                vec![ChatMessage::system(COMPOSER_DIRECTIVE), ChatMessage::user(prompt)],
                ResponseFormat::Text,
            )
            .await
            .map_err(|e| CompositionError::UpstreamUnavailable(e.to_string()))?;

        match replies.into_iter().next() {
            Some(reply) if !reply.trim().is_empty() => Ok(reply),
            _ => Err(CompositionError::EmptyReply),
        }
    }
}
