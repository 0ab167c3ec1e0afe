//! Timer session HTTP handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::response::{domain_error, ApiResponse, ApiResult, ErrorResponse};
use crate::state::AppState;
use timetrack_core::domain::TimerSession;
use timetrack_shared::Pagination;

/// Start request payload; the body may be omitted entirely.
#[derive(Debug, Deserialize)]
pub struct StartTimerRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNotesRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Start handler - POST /timer/start
pub async fn start(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    payload: Option<Json<StartTimerRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<TimerSession>>), ErrorResponse> {
    let notes = payload.and_then(|Json(body)| body.notes);
    let session = state
        .timer
        .start(&user.id, notes)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(session))))
}

/// Stop handler - POST /timer/stop/{id}
pub async fn stop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<TimerSession> {
    let session = state
        .timer
        .stop(&user.id, &id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(session)))
}

/// Active session handler - GET /timer/active
///
/// `data` is null when no session is active; that is a success, not an
/// error.
pub async fn active(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Option<TimerSession>> {
    let session = state
        .timer
        .get_active(&user.id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(session)))
}

/// Session list handler - GET /timer/sessions?limit&offset
pub async fn sessions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<SessionsQuery>,
) -> ApiResult<Vec<TimerSession>> {
    let default = Pagination::default();
    let pagination = Pagination {
        limit: query.limit.unwrap_or(default.limit),
        offset: query.offset.unwrap_or(default.offset),
    };
    let sessions = state
        .timer
        .list_sessions(&user.id, pagination)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(sessions)))
}

/// Notes update handler - PATCH /timer/{id}/notes
pub async fn update_notes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNotesRequest>,
) -> ApiResult<TimerSession> {
    let session = state
        .timer
        .update_notes(&user.id, &id, Some(payload.notes))
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(session)))
}

/// Delete handler - DELETE /timer/{id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    state
        .timer
        .delete(&user.id, &id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(())))
}
