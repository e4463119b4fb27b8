//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{assets, audit, auth, backup, checks, health, loans, maintenance, settings, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "MedEquip API",
        version = "1.0.0",
        description = "Hospital Medical Equipment Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::register,
        auth::me,
        // Assets
        assets::list_assets,
        assets::get_asset,
        assets::create_asset,
        assets::update_asset,
        assets::delete_asset,
        assets::export_assets,
        // Audit
        audit::get_audit,
        audit::mark_asset,
        audit::reset_audit,
        audit::export_audit,
        // Checks
        checks::list_checks,
        checks::create_check,
        checks::send_daily_summary,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance_status,
        maintenance::maintenance_summary,
        maintenance::send_pm_alerts,
        maintenance::export_maintenance,
        // Loans
        loans::list_loans,
        loans::available_assets,
        loans::create_loan,
        loans::return_loan,
        // Stats
        stats::get_dashboard,
        stats::get_compliance,
        stats::export_compliance,
        // Settings
        settings::get_public_settings,
        settings::get_settings,
        settings::update_settings,
        settings::add_department,
        settings::remove_department,
        // Backup
        backup::export_backup,
        backup::import_backup,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::RegisterRequest,
            crate::models::user::UserInfo,
            crate::models::enums::Role,
            // Assets
            crate::models::asset::Asset,
            crate::models::asset::AssetInput,
            crate::models::enums::AssetStatus,
            // Audit
            crate::models::audit::AuditMark,
            crate::models::audit::AuditEntry,
            crate::models::audit::AuditSummary,
            crate::models::audit::AuditReport,
            crate::models::enums::AuditStatus,
            audit::AuditMarkResponse,
            // Checks
            crate::models::check::ChecklistDetails,
            crate::models::check::CheckRecord,
            crate::models::check::CreateCheck,
            crate::models::check::DailySummary,
            crate::models::check::DailySummaryRequest,
            crate::models::enums::CheckStatus,
            // Maintenance
            crate::models::maintenance::MaintenanceRecord,
            crate::models::maintenance::MaintenanceMode,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenanceStatus,
            crate::models::maintenance::PmScheduleEntry,
            crate::models::maintenance::MaintenanceSummary,
            crate::models::maintenance::PmAlertResponse,
            crate::models::enums::MaintenanceType,
            crate::models::enums::MaintenanceStatus,
            // Loans
            crate::models::loan::LoanRecord,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            crate::models::loan::ReturnLoan,
            crate::models::enums::LoanStatus,
            // Stats
            crate::models::stats::StatusCount,
            crate::models::stats::DashboardStats,
            crate::models::stats::ComplianceReport,
            // Settings
            crate::models::settings::AppSettings,
            crate::models::settings::PublicSettings,
            crate::models::settings::DepartmentRequest,
            // Backup
            crate::models::backup::BackupDocument,
            backup::ImportResponse,
            // Health
            health::HealthResponse,
            health::ReadinessResponse,
            crate::repository::StorageMode,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication and registration"),
        (name = "assets", description = "Equipment registry"),
        (name = "audit", description = "Physical asset count"),
        (name = "checks", description = "Daily inspection checks"),
        (name = "maintenance", description = "Repair requests and preventive maintenance"),
        (name = "loans", description = "Equipment loans between departments"),
        (name = "stats", description = "Dashboard and compliance statistics"),
        (name = "settings", description = "System settings"),
        (name = "backup", description = "Data backup and restore")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
