use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failures of the interview core.
///
/// `Validation` and `State` are caller mistakes and are raised before any model
/// call. `Upstream` is the only kind expected in normal operation; it always
/// leaves the session exactly as it was.
#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] LlmError),

    #[error("State error: {0}")]
    State(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Interview(#[from] InterviewError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), false),
            AppError::Interview(InterviewError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), false)
            }
            AppError::Interview(InterviewError::State(msg)) => {
                (StatusCode::CONFLICT, "STATE_ERROR", msg.clone(), false)
            }
            AppError::Interview(InterviewError::Upstream(e)) => {
                tracing::error!("Upstream error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    format!("The interview service could not reach the language model: {e}"),
                    true,
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}
