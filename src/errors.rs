use crate::services::bucket_service::BucketError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16()
        }));

        (self.status, body).into_response()
    }
}

impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        let status = match &err {
            BucketError::RegionNotFound(_) | BucketError::BucketNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BucketError::BucketNameTaken(_) | BucketError::RefererConflict(_) => {
                StatusCode::CONFLICT
            }
            BucketError::InvalidBucketName { .. } => StatusCode::BAD_REQUEST,
            BucketError::Sqlx(inner) => {
                tracing::error!("database error: {}", inner);
                return AppError::internal("internal database error");
            }
        };
        AppError::new(status, err.to_string())
    }
}
