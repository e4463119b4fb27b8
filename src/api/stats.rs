//! Dashboard and compliance statistics

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::stats::{ComplianceReport, DashboardStats},
};

use super::{AuthenticatedUser, CsvFile};

/// Dashboard counters over visible assets
#[utoipa::path(
    get,
    path = "/stats/dashboard",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats)
    )
)]
pub async fn get_dashboard(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.stats.dashboard(&claims).await?;
    Ok(Json(stats))
}

/// Check pass rate, uptime and maintenance history
#[utoipa::path(
    get,
    path = "/stats/compliance",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Compliance report", body = ComplianceReport)
    )
)]
pub async fn get_compliance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ComplianceReport>> {
    let report = state.services.stats.compliance(&claims).await?;
    Ok(Json(report))
}

/// Export the compliance maintenance history as CSV
#[utoipa::path(
    get,
    path = "/stats/compliance/export",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    )
)]
pub async fn export_compliance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<CsvFile> {
    let csv = state.services.stats.compliance_csv(&claims).await?;
    Ok(CsvFile::new("compliance_report", csv))
}
