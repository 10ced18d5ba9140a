//! API 模块
//!
//! 提供 REST API 支持。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::observability::metrics_middleware;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let metrics = app_state.metrics.clone();

    Router::new()
        .merge(routes::chat_routes::create_chat_router())
        .layer(axum::middleware::from_fn_with_state(metrics, metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
