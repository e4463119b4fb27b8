//! Daily inspection check endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        check::{CheckQuery, CreateCheck, DailySummary, DailySummaryRequest},
        CheckRecord,
    },
};

use super::AuthenticatedUser;

/// List checks
#[utoipa::path(
    get,
    path = "/checks",
    tag = "checks",
    security(("bearer_auth" = [])),
    params(CheckQuery),
    responses(
        (status = 200, description = "Checks on visible assets", body = Vec<CheckRecord>)
    )
)]
pub async fn list_checks(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<CheckQuery>,
) -> AppResult<Json<Vec<CheckRecord>>> {
    let checks = state.services.checks.list(&claims, &query).await?;
    Ok(Json(checks))
}

/// Record a daily check
#[utoipa::path(
    post,
    path = "/checks",
    tag = "checks",
    security(("bearer_auth" = [])),
    request_body = CreateCheck,
    responses(
        (status = 201, description = "Check recorded", body = CheckRecord),
        (status = 400, description = "Failed item without a note", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_check(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateCheck>,
) -> AppResult<(StatusCode, Json<CheckRecord>)> {
    let check = state.services.checks.create(&claims, data).await?;
    Ok((StatusCode::CREATED, Json(check)))
}

/// Send today's check summary
#[utoipa::path(
    post,
    path = "/checks/summary",
    tag = "checks",
    security(("bearer_auth" = [])),
    request_body(content = DailySummaryRequest, description = "Optional sender name"),
    responses(
        (status = 200, description = "Summary sent", body = DailySummary),
        (status = 400, description = "No checks recorded today", body = crate::error::ErrorResponse)
    )
)]
pub async fn send_daily_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    request: Option<Json<DailySummaryRequest>>,
) -> AppResult<Json<DailySummary>> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let summary = state.services.checks.send_daily_summary(&claims, request).await?;
    Ok(Json(summary))
}
