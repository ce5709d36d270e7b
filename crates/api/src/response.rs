//! Shared response envelope types for API handlers.
//!
//! Every JSON response carries a top-level `status` discriminator:
//! `{ "status": "ok", "message": ..., "data": ... }` on success and
//! `{ "status": "error", "code": ..., "message": ..., "errors": [...] }`
//! on failure (built by [`crate::error::AppError`]).

use serde::{Deserialize, Serialize};

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "error";

/// Success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::ok("Application submitted", accepted)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub status: &'static str,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(message: &'static str, data: T) -> Self {
        Self {
            status: STATUS_OK,
            message,
            data,
        }
    }
}

/// Failure envelope. `errors` is never empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
    pub errors: Vec<String>,
}
