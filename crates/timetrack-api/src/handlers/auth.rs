//! Authentication HTTP handlers (signup, signin, me)

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::middleware::CurrentUser;
use crate::response::{domain_error, ApiResponse, ApiResult, ErrorResponse};
use crate::state::AppState;
use timetrack_core::services::{AuthUser, AuthenticatedUser};

/// Signup request payload
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Signin request payload
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Signup handler - POST /auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthenticatedUser>>), ErrorResponse> {
    let result = state
        .auth
        .signup(&payload.email, &payload.password, &payload.name)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(result))))
}

/// Signin handler - POST /auth/signin
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> ApiResult<AuthenticatedUser> {
    let result = state
        .auth
        .signin(&payload.email, &payload.password)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(result)))
}

/// Current user handler - GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<AuthUser>> {
    Json(ApiResponse::success(user))
}
