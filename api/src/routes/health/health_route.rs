//! GET /health: reports whether page data can be loaded.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use crate::core::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<usize>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    match state.pipeline.pages().load().await {
        Ok(data) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                pages: Some(data.pages.len()),
                dimension: Some(data.embeddings.dimension()),
            }),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, "health: page data unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    pages: None,
                    dimension: None,
                }),
            )
                .into_response()
        }
    }
}
