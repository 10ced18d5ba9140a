use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

/// 语言模型配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI 兼容接口地址（不含 `/chat/completions`）
    pub base_url: String,
    /// API 密钥
    pub api_key: String,
    /// 模型名称
    pub model: String,
    /// 采样温度
    pub temperature: f32,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

/// 分发配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DispatchConfig {
    /// 模型未给出 limit 时按日期排序查询的默认条数
    pub default_likes_limit: u32,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// 存储后端: "memory" 或 "surrealdb"
    pub backend: String,
    /// SurrealDB 连接地址
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过认证）
    pub username: String,
    /// 密码
    pub password: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

/// 导入配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestionConfig {
    /// takeout 导出目录
    pub takeout_dir: PathBuf,
    /// 粉丝文件名
    pub followers_file: String,
    /// 关注文件名
    pub followings_file: String,
    /// 点赞文件名
    pub likes_file: String,
    /// 导入前清空已有数据
    pub drop_existing: bool,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 语言模型配置
    pub llm: LlmConfig,
    /// 分发配置
    pub dispatch: DispatchConfig,
    /// 存储配置
    pub storage: StorageConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 导入配置
    pub ingestion: IngestionConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                request_timeout: 60,
            },
            llm: LlmConfig {
                base_url: "https://api.openai.com/v1".into(),
                api_key: String::new(),
                model: "gpt-3.5-turbo".into(),
                temperature: 0.2,
                timeout_secs: 30,
            },
            dispatch: DispatchConfig {
                default_likes_limit: 10,
            },
            storage: StorageConfig {
                backend: "memory".into(),
                url: "mem://".into(),
                namespace: "protohush".into(),
                database: "instagram".into(),
                username: String::new(),
                password: String::new(),
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            ingestion: IngestionConfig {
                takeout_dir: PathBuf::from("./takeout/ig"),
                followers_file: "followers.json".into(),
                followings_file: "following.json".into(),
                likes_file: "liked_posts.json".into(),
                drop_existing: true,
            },
            app_name: "protohush".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.storage.backend = "surrealdb".into();
        config.storage.url = "ws://localhost:8000".into();
        config
    }
}
