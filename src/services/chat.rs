//! 对话检索服务
//!
//! 串联意图解析、分发和回复生成三个阶段，任一阶段失败即中止。

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::config::DispatchConfig;
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::models::chat::ChatResponse;
use crate::services::composer::ReplyComposer;
use crate::services::dispatcher::IntentDispatcher;
use crate::services::resolver::QueryResolver;
use crate::storage::repository::SocialStore;

/// 对话服务 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatService: Send + Sync {
    /// 处理一条自然语言指令并返回生成的回复
    async fn search(&self, instruction: &str) -> Result<ChatResponse>;
}

/// 对话服务实现
pub struct ChatServiceImpl {
    resolver: QueryResolver,
    dispatcher: IntentDispatcher,
    composer: ReplyComposer,
}

impl ChatServiceImpl {
    /// 创建新的对话服务
    pub fn new(
        model: Arc<dyn LanguageModel>,
        store: Arc<dyn SocialStore>,
        dispatch: &DispatchConfig,
    ) -> Self {
        Self {
            resolver: QueryResolver::new(model.clone()),
            dispatcher: IntentDispatcher::new(store, dispatch.default_likes_limit),
            composer: ReplyComposer::new(model),
        }
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn search(&self, instruction: &str) -> Result<ChatResponse> {
        let started = Instant::now();

        let query = self.resolver.resolve(instruction).await?;
        let outcome = self.dispatcher.dispatch(&query).await;
        let data = self.composer.compose(&outcome).await?;

        info!(
            intention = %outcome.intention,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "chat search completed"
        );

        Ok(ChatResponse {
            intention: outcome.intention,
            data,
        })
    }
}

/// 创建对话服务
pub fn create_chat_service(
    model: Arc<dyn LanguageModel>,
    store: Arc<dyn SocialStore>,
    dispatch: &DispatchConfig,
) -> Box<dyn ChatService> {
    Box::new(ChatServiceImpl::new(model, store, dispatch))
}
