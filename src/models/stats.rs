//! Dashboard and compliance report types

use serde::Serialize;
use utoipa::ToSchema;

use super::{asset::Asset, enums::AssetStatus, maintenance::MaintenanceRecord};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: AssetStatus,
    /// Display label
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_assets: usize,
    pub active_assets: usize,
    /// Share of active assets, whole percent
    pub active_percent: u32,
    pub loaned_assets: usize,
    /// PM Due plus Under Repair
    pub maintenance_due: usize,
    /// Non-zero statuses only
    pub status_breakdown: Vec<StatusCount>,
    /// First three assets due for PM
    pub pm_due: Vec<Asset>,
    /// First three loaned assets
    pub loaned: Vec<Asset>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub total_checks: usize,
    pub passed_checks: usize,
    /// Percentage of checks that passed
    pub pass_rate: f64,
    /// Percentage of assets neither PM Due nor Under Repair
    pub uptime_rate: f64,
    /// Maintenance records not yet completed
    pub open_maintenance: usize,
    pub maintenance: Vec<MaintenanceRecord>,
}
