//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;
use crate::services::ServiceError;
use crate::swagger::SwaggerError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed or body unreadable (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique name already taken (409)
    Conflict { resource: &'static str, key: String },

    /// Write referenced a record that does not exist (422)
    MissingReference { detail: String },

    /// Swagger upstream failed (502, logged)
    Upstream(SwaggerError),

    /// Store unreachable (503, logged)
    Unavailable(DbError),

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Conflict { resource, key } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": format!("{} '{}' already exists", resource, key)
                }),
            ),
            Self::MissingReference { detail } => {
                tracing::warn!("Missing reference: {}", detail);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "error": "missing_reference",
                        "message": "a referenced record does not exist"
                    }),
                )
            }
            Self::Upstream(e) => {
                tracing::error!("Swagger upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "upstream_error",
                        "message": "failed to fetch API definition"
                    }),
                )
            }
            Self::Unavailable(e) => {
                tracing::error!("Store unavailable: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({
                        "error": "unavailable",
                        "message": "the store is temporarily unavailable"
                    }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { resource, key } => Self::Conflict { resource, key },
            DbError::MissingReference { detail } => Self::MissingReference { detail },
            DbError::Unavailable(_) => Self::Unavailable(e),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(e) => e.into(),
            ServiceError::Store(e) => e.into(),
        }
    }
}

impl From<SwaggerError> for ApiError {
    fn from(e: SwaggerError) -> Self {
        Self::Upstream(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::Malformed {
            reason: rejection.body_text(),
        })
    }
}
