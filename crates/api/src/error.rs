use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use landing_core::error::CoreError;
use serde_json::json;

/// Message returned for every 5xx response; the detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `landing_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the document store.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::UnsupportedMediaType(msg) => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_MEDIA_TYPE",
                    msg.clone(),
                ),
                CoreError::Processing(msg) => {
                    tracing::error!(error = %msg, "Image processing failed");
                    internal("PROCESSING_ERROR")
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal("DATABASE_ERROR")
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal("INTERNAL_ERROR")
            }
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Malformed, oversized or non-JSON bodies are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// A missing or malformed multipart body is a client error.
impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

fn internal(code: &'static str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
