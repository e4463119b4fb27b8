//! Shared domain enums
//!
//! Wire labels match the ones stored by existing deployments (spreadsheet
//! rows and local JSON), so they are spelled out explicitly.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Operational status of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum AssetStatus {
    #[default]
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Under Repair", alias = "Repair")]
    Repair,
    #[serde(rename = "PM Due", alias = "MaintenanceDue")]
    MaintenanceDue,
    #[serde(rename = "Loaned")]
    Loaned,
    #[serde(rename = "Disposed")]
    Disposed,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 5] = [
        AssetStatus::Active,
        AssetStatus::Repair,
        AssetStatus::MaintenanceDue,
        AssetStatus::Loaned,
        AssetStatus::Disposed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "Active",
            AssetStatus::Repair => "Under Repair",
            AssetStatus::MaintenanceDue => "PM Due",
            AssetStatus::Loaned => "Loaned",
            AssetStatus::Disposed => "Disposed",
        }
    }

    /// Thai label used on the dashboard breakdown
    pub fn label(&self) -> &'static str {
        match self {
            AssetStatus::Active => "ใช้งานปกติ",
            AssetStatus::Repair => "ส่งซ่อม",
            AssetStatus::MaintenanceDue => "ถึงรอบ PM",
            AssetStatus::Loaned => "ถูกยืม",
            AssetStatus::Disposed => "จำหน่าย",
        }
    }

    /// Statuses that count against equipment uptime
    pub fn needs_attention(&self) -> bool {
        matches!(self, AssetStatus::Repair | AssetStatus::MaintenanceDue)
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

/// Outcome of a daily check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CheckStatus {
    Pass,
    Fail,
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

/// PM = preventive (scheduled), CM = corrective (repair)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MaintenanceType {
    PM,
    CM,
}

impl std::fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceType::PM => f.write_str("PM"),
            MaintenanceType::CM => f.write_str("CM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MaintenanceStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaintenanceStatus::Pending => f.write_str("Pending"),
            MaintenanceStatus::InProgress => f.write_str("In Progress"),
            MaintenanceStatus::Completed => f.write_str("Completed"),
        }
    }
}

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoanStatus {
    Active,
    Overdue,
    Returned,
}

impl LoanStatus {
    /// Loans that still hold the asset
    pub fn is_open(&self) -> bool {
        !matches!(self, LoanStatus::Returned)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Account role. Staff accounts are scoped to their department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    #[default]
    Staff,
}

// ---------------------------------------------------------------------------
// AuditStatus
// ---------------------------------------------------------------------------

/// Physical count result for one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Found,
    Missing,
    #[default]
    Unchecked,
}

impl AuditStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AuditStatus::Found => "Found",
            AuditStatus::Missing => "Missing",
            AuditStatus::Unchecked => "Not Checked",
        }
    }
}
