use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "PROTOHUSH_CONFIG";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（低到高）：
    /// 1. 开发环境默认值
    /// 2. `$PROTOHUSH_CONFIG` 或 ./config.toml
    /// 3. `PROTOHUSH_` 前缀的环境变量，层级用 `__` 分隔
    pub fn load() -> Result<AppConfig, figment::Error> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path());
        Self::load_from(path)
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PROTOHUSH_").split("__").global())
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::MissingModel);
        }

        match config.storage.backend.as_str() {
            "memory" => {}
            "surrealdb" => {
                if config.storage.url.is_empty() {
                    return Err(ConfigValidationError::MissingDatabaseUrl);
                }
            }
            other => return Err(ConfigValidationError::UnknownBackend(other.to_string())),
        }

        if config.dispatch.default_likes_limit == 0 {
            return Err(ConfigValidationError::InvalidLimit);
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("语言模型名称未配置")]
    MissingModel,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("未知的存储后端: {0}")]
    UnknownBackend(String),

    #[error("默认查询条数无效，必须大于 0")]
    InvalidLimit,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
