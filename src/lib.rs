//! MedEquip hospital equipment management
//!
//! REST JSON API for the equipment registry, daily inspection checks,
//! maintenance, loans between departments and physical audits. Records are
//! kept in a local JSON store or in a remote spreadsheet endpoint.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/register", post(api::auth::register))
        .route("/auth/me", get(api::auth::me))
        // Assets
        .route("/assets", get(api::assets::list_assets))
        .route("/assets", post(api::assets::create_asset))
        .route("/assets/export", get(api::assets::export_assets))
        .route("/assets/:id", get(api::assets::get_asset))
        .route("/assets/:id", put(api::assets::update_asset))
        .route("/assets/:id", delete(api::assets::delete_asset))
        // Audit
        .route("/audit", get(api::audit::get_audit))
        .route("/audit", delete(api::audit::reset_audit))
        .route("/audit/export", get(api::audit::export_audit))
        .route("/audit/:asset_id", post(api::audit::mark_asset))
        // Daily checks
        .route("/checks", get(api::checks::list_checks))
        .route("/checks", post(api::checks::create_check))
        .route("/checks/summary", post(api::checks::send_daily_summary))
        // Maintenance
        .route("/maintenance", get(api::maintenance::list_maintenance))
        .route("/maintenance", post(api::maintenance::create_maintenance))
        .route("/maintenance/summary", get(api::maintenance::maintenance_summary))
        .route("/maintenance/pm-alerts", post(api::maintenance::send_pm_alerts))
        .route("/maintenance/export", get(api::maintenance::export_maintenance))
        .route("/maintenance/:id/status", put(api::maintenance::update_maintenance_status))
        // Loans
        .route("/loans", get(api::loans::list_loans))
        .route("/loans", post(api::loans::create_loan))
        .route("/loans/available-assets", get(api::loans::available_assets))
        .route("/loans/:id/return", post(api::loans::return_loan))
        // Statistics
        .route("/stats/dashboard", get(api::stats::get_dashboard))
        .route("/stats/compliance", get(api::stats::get_compliance))
        .route("/stats/compliance/export", get(api::stats::export_compliance))
        // Settings
        .route("/settings", get(api::settings::get_settings))
        .route("/settings", put(api::settings::update_settings))
        .route("/settings/public", get(api::settings::get_public_settings))
        .route("/settings/departments", post(api::settings::add_department))
        .route("/settings/departments/:name", delete(api::settings::remove_department))
        // Backup
        .route("/backup", get(api::backup::export_backup))
        .route("/backup", post(api::backup::import_backup))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
