//! 可观测性模块
//!
//! 提供 Prometheus 指标、结构化日志和健康检查。

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::config::LoggingConfig;
use crate::error::{AppError, Result};

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Clone, Default)]
pub struct AppMetrics {
    pub http_requests_total: Arc<AtomicU64>,
    pub http_request_duration_sum: Arc<AtomicU64>,
    pub chat_requests_total: Arc<AtomicU64>,
    pub chat_latency_sum: Arc<AtomicU64>,
    pub unknown_intentions_total: Arc<AtomicU64>,
    pub errors_total: Arc<AtomicU64>,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::SeqCst);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录一次对话检索
    pub fn record_chat(&self, duration_ms: u64) {
        self.chat_requests_total.fetch_add(1, Ordering::SeqCst);
        self.chat_latency_sum.fetch_add(duration_ms, Ordering::SeqCst);
    }

    /// 记录未识别的意图
    pub fn record_unknown_intention(&self) {
        self.unknown_intentions_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::SeqCst);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds histogram
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP chat_requests_total Total chat search requests
# TYPE chat_requests_total counter
chat_requests_total {}
# HELP chat_latency_seconds Chat search latency in seconds
# TYPE chat_latency_seconds histogram
chat_latency_seconds_sum {}
chat_latency_seconds_count {}
# HELP unknown_intentions_total Instructions resolved to an unrecognized intention
# TYPE unknown_intentions_total counter
unknown_intentions_total {}
# HELP errors_total Total pipeline errors
# TYPE errors_total counter
errors_total {}
"#,
            self.http_requests_total.load(Ordering::SeqCst),
            self.http_request_duration_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.http_requests_total.load(Ordering::SeqCst),
            self.chat_requests_total.load(Ordering::SeqCst),
            self.chat_latency_sum.load(Ordering::SeqCst) as f64 / 1000.0,
            self.chat_requests_total.load(Ordering::SeqCst),
            self.unknown_intentions_total.load(Ordering::SeqCst),
            self.errors_total.load(Ordering::SeqCst),
        )
    }
}

// ===== Health Check =====

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub storage_backend: String,
}

/// 可观测性路由状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub start_time: DateTime<Utc>,
    pub version: String,
    pub storage_backend: String,
}

impl ObservabilityState {
    pub fn new(version: String, storage_backend: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            start_time: Utc::now(),
            version,
            storage_backend,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        storage_backend: state.storage_backend.clone(),
    })
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (axum::http::StatusCode::OK, state.metrics.gather())
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于 `logging.level`。设置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 必须在进程生命周期内保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "protohush.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.structured {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_writer(writer)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| AppError::Internal(format!("failed to set tracing subscriber: {}", e)))?;

    Ok(guard)
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let start = std::time::Instant::now();
    let response = next.run(req).await;
    metrics.record_http_request(start.elapsed().as_millis() as u64);
    response
}
