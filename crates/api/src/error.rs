use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sjaplus_core::error::CoreError;
use sjaplus_core::storage::StorageError;
use sjaplus_core::upload::UploadViolation;

use crate::response::{ErrorResponse, STATUS_ERROR};

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors from `sjaplus_core` and adds the request-level
/// failure kinds of the submission endpoint. Implements [`IntoResponse`] to
/// produce the shared JSON error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `sjaplus_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The body or the `meta` field could not be decoded.
    #[error("{summary}: {detail}")]
    MalformedRequest {
        summary: &'static str,
        detail: String,
    },

    /// A required form field or file part was absent.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Metadata failed one or more business rules.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// An uploaded file is too large or has a disallowed extension.
    #[error(transparent)]
    Upload(#[from] UploadViolation),

    /// Persisting an accepted submission failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status, machine-readable code, summary message and details.
    fn parts(&self) -> (StatusCode, &'static str, String, Vec<String>) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                    vec![format!("{entity} with id {id} not found")],
                ),
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                    vec![msg.clone()],
                ),
            },

            // --- Submission failures ---
            AppError::MalformedRequest { summary, detail } => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_REQUEST",
                summary.to_string(),
                vec![detail.clone()],
            ),
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                "Missing required field".to_string(),
                vec![format!("{field} is required")],
            ),
            AppError::ValidationFailed(errors) => {
                let errors = if errors.is_empty() {
                    vec!["metadata is invalid".to_string()]
                } else {
                    errors.clone()
                };
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_FAILED",
                    "Request validation failed".to_string(),
                    errors,
                )
            }
            AppError::Upload(violation @ UploadViolation::TooLarge(kind)) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                format!("{} image is too large", kind.label()),
                vec![violation.to_string()],
            ),
            AppError::Upload(violation @ UploadViolation::UnsupportedType(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                "Unsupported file type".to_string(),
                vec![violation.to_string()],
            ),

            // --- Storage errors ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage failure");
                let detail = match err {
                    StorageError::Persist { stage, .. } => format!("Failed to {stage}"),
                    StorageError::Init { .. } | StorageError::Load { .. } => {
                        "Storage is unavailable".to_string()
                    }
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_FAILURE",
                    "Failed to store application".to_string(),
                    vec![detail],
                )
            }

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String, Vec<String>) {
    let message = "An internal error occurred".to_string();
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        message.clone(),
        vec![message],
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = self.parts();

        let body = ErrorResponse {
            status: STATUS_ERROR.to_string(),
            code: code.to_string(),
            message,
            errors,
        };

        (status, axum::Json(body)).into_response()
    }
}
