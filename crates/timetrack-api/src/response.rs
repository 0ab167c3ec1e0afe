//! API Response wrapper

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::error;

use timetrack_core::error::DomainError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ErrorResponse>;

/// Maps a domain error to its wire representation. Storage and hashing
/// faults are logged with detail server-side and surfaced opaquely.
pub fn domain_error(err: DomainError) -> ErrorResponse {
    let (status, code, message) = match &err {
        DomainError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        DomainError::ActiveSessionExists => (
            StatusCode::CONFLICT,
            "ACTIVE_SESSION_EXISTS",
            err.to_string(),
        ),
        DomainError::SessionNotFound => {
            (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", err.to_string())
        }
        DomainError::SessionAlreadyStopped => (
            StatusCode::BAD_REQUEST,
            "SESSION_ALREADY_STOPPED",
            err.to_string(),
        ),
        DomainError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            err.to_string(),
        ),
        DomainError::EmailAlreadyExists(_) => (
            StatusCode::CONFLICT,
            "EMAIL_ALREADY_EXISTS",
            "User with this email already exists".to_string(),
        ),
        DomainError::PasswordHashError(detail)
        | DomainError::TokenGenerationError(detail)
        | DomainError::DatabaseError(detail) => {
            error!("Internal error: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(ApiResponse::error(code, &message)))
}

pub fn unauthorized() -> ErrorResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::error("UNAUTHORIZED", "Unauthorized")),
    )
}
