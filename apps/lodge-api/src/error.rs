//! Error types for the REST surface.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl is
//! the single place where errors become HTTP. Database and domain errors
//! fold in through `From`, so handlers mostly just use `?`.
//!
//! ```text
//! Validation / bad input        → 400  { "message": ... }
//! Missing or invalid bearer     → 401
//! Row missing or foreign tenant → 404
//! Everything else               → 500  generic message; detail only
//!                                       in development mode
//! ```

use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use lodge_core::{CoreError, ValidationError};
use lodge_db::DbError;

static DEV_MODE: OnceLock<bool> = OnceLock::new();

/// Records whether 500 responses may carry failure detail. Set once at
/// startup; later calls are ignored.
pub fn set_dev_mode(enabled: bool) {
    let _ = DEV_MODE.set(enabled);
}

fn dev_mode() -> bool {
    DEV_MODE.get().copied().unwrap_or(false)
}

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "message": msg }))
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": msg }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            ApiError::Internal(detail) => {
                error!(%detail, "Unhandled error");
                let body = if dev_mode() {
                    json!({ "message": "Something went wrong", "detail": detail })
                } else {
                    json!({ "message": "Something went wrong" })
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::NotFound { .. } => ApiError::NotFound(error.to_string()),
            DbError::UniqueViolation { .. } => ApiError::BadRequest(error.to_string()),
            DbError::ForeignKeyViolation { .. } => ApiError::BadRequest(error.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(error: bcrypt::BcryptError) -> Self {
        ApiError::Internal(format!("Password verification failed: {error}"))
    }
}
