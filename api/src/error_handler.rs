use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A model provider failed, so there is no answer to return.
    #[error("no answer for question")]
    NoAnswer { question: String },

    /// Details are logged, never sent.
    #[error("internal server error")]
    Internal,
}

impl AppError {
    /// Maps a pipeline failure for `question` and logs the internal detail.
    pub fn from_ask(err: ContextorError, question: &str) -> Self {
        match err {
            ContextorError::Validation(msg) => AppError::BadRequest(msg),
            e if e.is_provider_failure() => {
                error!(error = %e, "ask failed at model provider");
                AppError::NoAnswer {
                    question: question.to_string(),
                }
            }
            e => {
                error!(error = %e, "ask failed");
                AppError::Internal
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NoAnswer { .. } => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct NoAnswerBody<'a> {
    question: &'a str,
    answer: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::NoAnswer { question } => (
                status,
                Json(NoAnswerBody {
                    question,
                    answer: None,
                }),
            )
                .into_response(),
            AppError::BadRequest(msg) => {
                (status, Json(ErrorBody { error: msg.clone() })).into_response()
            }
            _ => (
                status,
                Json(ErrorBody {
                    error: AppError::Internal.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
