//! Dashboard and compliance statistics

use super::{export, visibility};
use crate::{
    error::AppResult,
    models::{
        stats::{ComplianceReport, DashboardStats, StatusCount},
        Asset, AssetStatus, CheckStatus, MaintenanceStatus, UserClaims,
    },
    repository::Repository,
};

const HIGHLIGHT_LEN: usize = 3;

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn dashboard(assets: &[Asset]) -> DashboardStats {
    let count = |status: AssetStatus| assets.iter().filter(|a| a.status == status).count();
    let first = |status: AssetStatus| -> Vec<Asset> {
        assets
            .iter()
            .filter(|a| a.status == status)
            .take(HIGHLIGHT_LEN)
            .cloned()
            .collect()
    };

    let active_assets = count(AssetStatus::Active);
    DashboardStats {
        total_assets: assets.len(),
        active_assets,
        active_percent: percent(active_assets, assets.len()).round() as u32,
        loaned_assets: count(AssetStatus::Loaned),
        maintenance_due: assets.iter().filter(|a| a.status.needs_attention()).count(),
        status_breakdown: AssetStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                label: status.label().to_string(),
                count: count(status),
            })
            .filter(|entry| entry.count > 0)
            .collect(),
        pm_due: first(AssetStatus::MaintenanceDue),
        loaned: first(AssetStatus::Loaned),
    }
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self, claims: &UserClaims) -> AppResult<DashboardStats> {
        let assets = visibility::visible_assets(claims, self.repository.assets_list().await?);
        Ok(dashboard(&assets))
    }

    pub async fn compliance(&self, claims: &UserClaims) -> AppResult<ComplianceReport> {
        let all_assets = self.repository.assets_list().await?;
        let checks = visibility::visible_records(
            claims,
            &all_assets,
            self.repository.checks_list().await?,
            |c| c.asset_id.as_str(),
        );
        let maintenance = visibility::visible_records(
            claims,
            &all_assets,
            self.repository.maintenance_list().await?,
            |r| r.asset_id.as_str(),
        );
        let assets = visibility::visible_assets(claims, all_assets);

        let passed_checks = checks.iter().filter(|c| c.status == CheckStatus::Pass).count();
        let in_service = assets.iter().filter(|a| !a.status.needs_attention()).count();

        Ok(ComplianceReport {
            total_checks: checks.len(),
            passed_checks,
            pass_rate: percent(passed_checks, checks.len()),
            uptime_rate: percent(in_service, assets.len()),
            open_maintenance: maintenance
                .iter()
                .filter(|r| r.status != MaintenanceStatus::Completed)
                .count(),
            maintenance,
        })
    }

    pub async fn compliance_csv(&self, claims: &UserClaims) -> AppResult<String> {
        let report = self.compliance(claims).await?;
        Ok(export::compliance_csv(&report.maintenance))
    }
}
