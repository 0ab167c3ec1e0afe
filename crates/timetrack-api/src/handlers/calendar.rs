//! Calendar HTTP handlers

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::middleware::CurrentUser;
use crate::response::{domain_error, ApiResponse, ApiResult};
use crate::state::AppState;
use timetrack_core::domain::{ContributionData, DailyStats, TimerSession};

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Daily stats handler - GET /calendar/daily/{date}
pub async fn daily(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(date): Path<String>,
) -> ApiResult<DailyStats> {
    let stats = state
        .calendar
        .daily_stats(&user.id, &date)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(stats)))
}

/// Range handler - GET /calendar/range?start&end
pub async fn range(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Vec<TimerSession>> {
    let (Some(start), Some(end)) = (query.start, query.end) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "VALIDATION_ERROR",
                "Start and end dates are required",
            )),
        ));
    };
    let sessions = state
        .calendar
        .range_sessions(&user.id, &start, &end)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(sessions)))
}

/// Contribution graph handler - GET /calendar/contributions
pub async fn contributions(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<ContributionData> {
    let data = state
        .calendar
        .contributions(&user.id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(data)))
}

/// Monthly summary handler - GET /calendar/monthly/{year}/{month}
pub async fn monthly(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((year, month)): Path<(i32, u32)>,
) -> ApiResult<BTreeMap<String, DailyStats>> {
    let summary = state
        .calendar
        .monthly_summary(&user.id, year, month)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(summary)))
}
