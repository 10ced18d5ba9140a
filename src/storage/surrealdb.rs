use crate::config::config::StorageConfig;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};

/// SurrealDB 连接池
///
/// `Surreal<Any>` 内部共享连接，克隆开销很小。
#[derive(Clone)]
pub struct SurrealPool {
    /// 数据库连接
    db: Surreal<Any>,
    /// 连接配置
    config: StorageConfig,
}

impl SurrealPool {
    /// 创建新的连接池
    pub async fn new(config: StorageConfig) -> Result<Self, surrealdb::Error> {
        let db: Surreal<Any> = connect(&config.url).await?;

        // 认证（嵌入式引擎通常不需要）
        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        // 选择命名空间和数据库
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Ok(Self { db, config })
    }

    /// 获取数据库实例
    pub fn inner(&self) -> &Surreal<Any> {
        &self.db
    }

    /// 连接地址
    pub fn url(&self) -> &str {
        &self.config.url
    }
}
