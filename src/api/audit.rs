//! Audit (physical count) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        asset::AssetQuery,
        audit::{AuditMark, AuditReport},
        AuditStatus,
    },
};

use super::{AuthenticatedUser, CsvFile};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditMarkResponse {
    pub asset_id: String,
    pub audit_status: AuditStatus,
}

/// Count progress for the filtered assets
#[utoipa::path(
    get,
    path = "/audit",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "Assets with count result and summary", body = AuditReport)
    )
)]
pub async fn get_audit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<AuditReport>> {
    let report = state.services.audit.report(&claims, &query).await?;
    Ok(Json(report))
}

/// Mark an asset found or missing (marking the same result again clears it)
#[utoipa::path(
    post,
    path = "/audit/{asset_id}",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(("asset_id" = String, Path, description = "Asset ID")),
    request_body = AuditMark,
    responses(
        (status = 200, description = "New count result", body = AuditMarkResponse)
    )
)]
pub async fn mark_asset(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(asset_id): Path<String>,
    Json(mark): Json<AuditMark>,
) -> AppResult<Json<AuditMarkResponse>> {
    let audit_status = state.services.audit.mark(&claims, &asset_id, mark.status).await?;
    Ok(Json(AuditMarkResponse { asset_id, audit_status }))
}

/// Reset count progress (Staff reset their own department only)
#[utoipa::path(
    delete,
    path = "/audit",
    tag = "audit",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Progress cleared")
    )
)]
pub async fn reset_audit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<StatusCode> {
    state.services.audit.reset(&claims).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export the count as CSV
#[utoipa::path(
    get,
    path = "/audit/export",
    tag = "audit",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    )
)]
pub async fn export_audit(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<CsvFile> {
    let csv = state.services.audit.export_csv(&claims, &query).await?;
    Ok(CsvFile::new("audit_report", csv))
}
