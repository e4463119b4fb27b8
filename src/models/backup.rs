//! Full data backup document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{asset::Asset, check::CheckRecord, loan::LoanRecord, maintenance::MaintenanceRecord};

/// Snapshot of every collection. On import, absent collections are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BackupDocument {
    #[serde(default)]
    pub assets: Option<Vec<Asset>>,
    #[serde(default)]
    pub checks: Option<Vec<CheckRecord>>,
    #[serde(default)]
    pub maintenance: Option<Vec<MaintenanceRecord>>,
    #[serde(default)]
    pub loans: Option<Vec<LoanRecord>>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}
