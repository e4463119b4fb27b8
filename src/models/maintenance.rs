//! Maintenance (repair requests and PM reports) model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::ToSchema;

use super::{
    enums::{MaintenanceStatus, MaintenanceType},
    sheet,
};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    #[serde(deserialize_with = "sheet::text")]
    pub id: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub asset_id: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub asset_name: String,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    #[serde(with = "sheet::date")]
    #[schema(value_type = String, format = Date)]
    pub request_date: NaiveDate,
    #[serde(deserialize_with = "sheet::text", default)]
    pub technician: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub description: String,
    #[serde(with = "sheet::decimal", default)]
    #[schema(value_type = f64)]
    pub cost: Decimal,
    /// Inline `data:` URI of the attached document
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub attachment_url: Option<String>,
    pub status: MaintenanceStatus,
}

/// Which form the record comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceMode {
    /// Corrective repair request: starts Pending, puts the asset under repair
    Repair,
    /// Completed preventive maintenance report
    Pm,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenance {
    pub mode: MaintenanceMode,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Defaults to today
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub request_date: Option<NaiveDate>,
    #[serde(with = "sheet::decimal", default)]
    #[schema(value_type = f64)]
    pub cost: Decimal,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMaintenanceStatus {
    pub status: MaintenanceStatus,
}

/// Upcoming PM entry shown next to the maintenance log
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PmScheduleEntry {
    pub asset_id: String,
    pub asset_name: String,
    pub department: String,
    #[schema(value_type = String, format = Date)]
    pub next_pm_date: NaiveDate,
    pub is_overdue: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    /// Sum of CM (repair) costs
    #[serde(serialize_with = "sheet::decimal::serialize")]
    #[schema(value_type = f64)]
    pub total_repair_cost: Decimal,
    /// Sum of PM costs
    #[serde(serialize_with = "sheet::decimal::serialize")]
    #[schema(value_type = f64)]
    pub total_pm_cost: Decimal,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub pm_schedule: Vec<PmScheduleEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PmAlertResponse {
    /// Number of alerts sent
    pub count: usize,
}
