//! 存储工厂模块
//!
//! 根据配置创建相应的存储实例。

use crate::config::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::storage::memory::MemorySocialStore;
use crate::storage::repository::SocialStore;
use std::sync::Arc;

#[cfg(feature = "surrealdb")]
use crate::storage::{repository::SurrealSocialStore, surrealdb::SurrealPool};

/// 根据配置创建存储实例
pub async fn create_social_store(config: &StorageConfig) -> Result<Arc<dyn SocialStore>> {
    match config.backend.as_str() {
        "memory" => Ok(Arc::new(MemorySocialStore::new())),
        "surrealdb" => create_surrealdb(config).await,
        other => Err(AppError::Config(format!("unknown storage backend: {}", other))),
    }
}

#[cfg(feature = "surrealdb")]
async fn create_surrealdb(config: &StorageConfig) -> Result<Arc<dyn SocialStore>> {
    let pool = SurrealPool::new(config.clone()).await?;
    tracing::info!(url = %pool.url(), "SurrealDB connection initialized");
    Ok(Arc::new(SurrealSocialStore::new(pool)))
}

#[cfg(not(feature = "surrealdb"))]
async fn create_surrealdb(_config: &StorageConfig) -> Result<Arc<dyn SocialStore>> {
    Err(AppError::Config(
        "SurrealDB feature is not enabled. Enable 'surrealdb' feature to use it.".into(),
    ))
}
