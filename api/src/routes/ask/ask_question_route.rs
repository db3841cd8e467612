//! POST /ask: answers a question about the book.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::{debug, info, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/ask \
///   -H 'content-type: application/json' \
///   -d '{"question":"Is money important?"}'
/// ```
#[instrument(name = "ask_question_route", skip_all)]
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }

    let Json(body) = payload?;
    let question = state
        .pipeline
        .normalize(&body.question)
        .map_err(|e| AppError::from_ask(e, &body.question))?;
    let outcome = state
        .pipeline
        .ask(&question)
        .await
        .map_err(|e| AppError::from_ask(e, &question))?;

    info!(
        id = outcome.entry.id,
        cache_hit = outcome.cache_hit,
        ask_count = outcome.entry.ask_count,
        "ask_question_route: answered"
    );

    Ok(Json(AskResponse {
        question: outcome.entry.question,
        answer: outcome.entry.answer,
        id: outcome.entry.id,
    }))
}
