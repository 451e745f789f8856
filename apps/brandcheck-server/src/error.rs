//! Error types for the brand compliance server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared_pdf::PdfTextError;
use thiserror::Error;
use vision_client::EvaluatorError;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Missing form field: {0}")]
    MissingField(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Model not configured: {0}")]
    ModelUnavailable(String),

    #[error("Model evaluation failed: {0}")]
    Evaluation(String),

    #[error("Model timeout after {0}ms")]
    Timeout(u64),

    #[error("Upload too large")]
    PayloadTooLarge,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::MissingField(name) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_FIELD",
                format!("Form field '{}' is required", name),
            ),
            ServerError::InvalidDocument(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_DOCUMENT", msg.clone())
            }
            ServerError::UnknownModel(name) => (
                StatusCode::BAD_REQUEST,
                "UNKNOWN_MODEL",
                format!("Unknown model: {}", name),
            ),
            ServerError::ModelUnavailable(name) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MODEL_UNAVAILABLE",
                format!("Model '{}' is not configured on this server", name),
            ),
            ServerError::Evaluation(msg) => {
                tracing::error!("Model evaluation error: {}", msg);
                (StatusCode::BAD_GATEWAY, "EVALUATION_FAILED", msg.clone())
            }
            ServerError::Timeout(ms) => (
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
                format!("Model timeout after {}ms", ms),
            ),
            ServerError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                "Uploaded files exceed the size limit".to_string(),
            ),
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PdfTextError> for ServerError {
    fn from(err: PdfTextError) -> Self {
        ServerError::InvalidDocument(err.to_string())
    }
}

impl From<EvaluatorError> for ServerError {
    fn from(err: EvaluatorError) -> Self {
        match err {
            EvaluatorError::InvalidImage(msg) => ServerError::InvalidRequest(msg),
            other => ServerError::Evaluation(other.to_string()),
        }
    }
}
