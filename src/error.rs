//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。
//!
//! 管道的三个阶段各自有独立的错误类型：[`ResolutionError`]、
//! [`CompositionError`]。分发阶段的失败不是错误，而是
//! [`DispatchFailure`](crate::models::dispatch::DispatchFailure) 数据。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 语言模型调用错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// 网络层失败（连接、超时、读取响应体）
    #[error("transport failure: {0}")]
    Transport(String),

    /// 服务端返回非 2xx 状态
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应体不是预期的 chat completion 结构
    #[error("undecodable completion: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LlmError::Decode(e.to_string())
        } else {
            LlmError::Transport(e.to_string())
        }
    }
}

/// 意图解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolutionError {
    /// 模型输出无法解码为结构化查询
    #[error("malformed model output: {0}")]
    MalformedModelOutput(String),

    /// 无法访问语言模型
    #[error("language model unavailable: {0}")]
    UpstreamUnavailable(String),
}

/// 回复生成错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionError {
    /// 无法访问语言模型
    #[error("language model unavailable: {0}")]
    UpstreamUnavailable(String),

    /// 模型没有返回任何候选回复
    #[error("language model returned no choices")]
    EmptyReply,
}

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(String),

    /// 参数验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    /// 请求处理超时
    #[error("操作超时: {0}")]
    Timeout(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 意图解析失败
    #[error("意图解析失败: {0}")]
    Resolution(#[from] ResolutionError),

    /// 回复生成失败
    #[error("回复生成失败: {0}")]
    Composition(#[from] CompositionError),

    /// 导入失败
    #[error("导入失败: {0}")]
    Ingestion(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(feature = "surrealdb")]
impl From<surrealdb::Error> for AppError {
    fn from(e: surrealdb::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

/// Axum response implementation for AppError
///
/// Only a fixed message leaves the process; the detailed error is logged.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let message = match &self {
            AppError::Validation(_) => "Bad request",
            _ => "Internal Server Error",
        };

        if status >= 500 {
            tracing::error!(code = %code, error = %self, "request failed");
        } else {
            tracing::debug!(code = %code, error = %self, "request rejected");
        }

        let body = Json(ErrorResponse::new(message, &code));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 面向调用方的固定错误消息
    pub error: String,
    /// 错误代码
    pub code: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::Validation(_) => (400, "BAD_REQUEST".to_string()),
            AppError::Timeout(_) => (500, "TIMEOUT".to_string()),
            AppError::Resolution(_) => (500, "RESOLUTION_ERROR".to_string()),
            AppError::Composition(_) => (500, "COMPOSITION_ERROR".to_string()),
            AppError::Database(_) => (500, "INTERNAL_ERROR".to_string()),
            _ => (500, "INTERNAL_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
