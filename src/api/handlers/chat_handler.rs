use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use std::time::Instant;
use tracing::{debug, warn};

use crate::{
    api::{app_state::AppState, dto::chat_dto::SearchRequest},
    error::AppError,
    models::chat::ChatResponse,
};

/// POST /protohush/search
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        state.metrics.record_error();
        AppError::Validation(rejection.body_text())
    })?;

    debug!("Chat search request: {}", request.message);
    let start_time = Instant::now();

    let result = tokio::time::timeout(
        state.request_timeout,
        state.chat_service.search(&request.message),
    )
    .await
    .unwrap_or_else(|_| {
        warn!(timeout = ?state.request_timeout, "chat search timed out");
        Err(AppError::Timeout(format!(
            "chat search exceeded {:?}",
            state.request_timeout
        )))
    });
    state
        .metrics
        .record_chat(start_time.elapsed().as_millis() as u64);

    match result {
        Ok(response) => {
            if !response.intention.is_known() {
                state.metrics.record_unknown_intention();
            }
            Ok(Json(response))
        }
        Err(e) => {
            state.metrics.record_error();
            Err(e)
        }
    }
}
