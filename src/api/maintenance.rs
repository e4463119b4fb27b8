//! Maintenance endpoints (repair requests, PM reports, PM alerts)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        maintenance::{CreateMaintenance, MaintenanceSummary, PmAlertResponse, UpdateMaintenanceStatus},
        MaintenanceRecord,
    },
};

use super::{AuthenticatedUser, CsvFile};

/// List maintenance records
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Records on visible assets", body = Vec<MaintenanceRecord>)
    )
)]
pub async fn list_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<MaintenanceRecord>>> {
    let records = state.services.maintenance.list(&claims).await?;
    Ok(Json(records))
}

/// File a repair request or a completed PM report
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Record created", body = MaintenanceRecord),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<MaintenanceRecord>)> {
    let record = state.services.maintenance.create(&claims, data).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Change a record's status
#[utoipa::path(
    put,
    path = "/maintenance/{id}/status",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Maintenance record ID")),
    request_body = UpdateMaintenanceStatus,
    responses(
        (status = 200, description = "Record updated", body = MaintenanceRecord),
        (status = 404, description = "Record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_maintenance_status(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<UpdateMaintenanceStatus>,
) -> AppResult<Json<MaintenanceRecord>> {
    let record = state
        .services
        .maintenance
        .update_status(&claims, &id, data.status)
        .await?;
    Ok(Json(record))
}

/// Cost totals, status counts and upcoming PM schedule
#[utoipa::path(
    get,
    path = "/maintenance/summary",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Maintenance summary", body = MaintenanceSummary)
    )
)]
pub async fn maintenance_summary(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<MaintenanceSummary>> {
    let summary = state.services.maintenance.summary(&claims).await?;
    Ok(Json(summary))
}

/// Send alerts for PM due within the next 7 days
#[utoipa::path(
    post,
    path = "/maintenance/pm-alerts",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Number of alerts sent", body = PmAlertResponse)
    )
)]
pub async fn send_pm_alerts(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<PmAlertResponse>> {
    let count = state.services.maintenance.check_upcoming_pms().await?;
    Ok(Json(PmAlertResponse { count }))
}

/// Export the maintenance log as CSV
#[utoipa::path(
    get,
    path = "/maintenance/export",
    tag = "maintenance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    )
)]
pub async fn export_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<CsvFile> {
    let csv = state.services.maintenance.export_csv(&claims).await?;
    Ok(CsvFile::new("maintenance_log", csv))
}
