//! Physical count (audit) progress

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{asset::Asset, enums::AuditStatus};

/// Persisted map of asset id to its count result
pub type AuditProgress = HashMap<String, AuditStatus>;

/// Flip a status: marking the same result twice clears it
pub fn toggle(current: AuditStatus, requested: AuditStatus) -> AuditStatus {
    if current == requested {
        AuditStatus::Unchecked
    } else {
        requested
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuditMark {
    pub status: AuditStatus,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub asset: Asset,
    pub audit_status: AuditStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub total: usize,
    pub found: usize,
    pub missing: usize,
    /// Share of assets counted (found or missing), rounded to a whole percent
    pub progress_percent: u32,
}

impl AuditSummary {
    pub fn compute<'a>(statuses: impl IntoIterator<Item = &'a AuditStatus>) -> Self {
        let mut summary = AuditSummary::default();
        for status in statuses {
            summary.total += 1;
            match status {
                AuditStatus::Found => summary.found += 1,
                AuditStatus::Missing => summary.missing += 1,
                AuditStatus::Unchecked => {}
            }
        }
        if summary.total > 0 {
            let counted = (summary.found + summary.missing) as f64;
            summary.progress_percent = (counted / summary.total as f64 * 100.0).round() as u32;
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
    pub summary: AuditSummary,
}
