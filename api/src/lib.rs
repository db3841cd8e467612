//! HTTP surface of the book QA service.
//!
//! - `POST /ask` answers a question
//! - `GET /health` reports whether page data loads

pub mod core;
pub mod error_handler;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::signal;
use tracing::{info, warn};

use crate::{
    core::app_state::{ApiConfig, AppState},
    error_handler::AppError,
    routes::{ask::ask_question_route::ask_question, health::health_route::health},
};

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask_question))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `config.address` and serves until Ctrl+C.
pub async fn start(config: ApiConfig, state: AppState) -> Result<(), AppError> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
