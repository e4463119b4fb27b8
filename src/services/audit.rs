//! Physical count (audit) service

use std::collections::HashSet;

use super::{export, visibility};
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::AssetQuery,
        audit::{AuditEntry, AuditReport, AuditSummary},
        AuditStatus, UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuditService {
    repository: Repository,
}

impl AuditService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Filtered visible assets with their count result
    pub async fn report(&self, claims: &UserClaims, query: &AssetQuery) -> AppResult<AuditReport> {
        let assets = query.apply(visibility::visible_assets(
            claims,
            self.repository.assets_list().await?,
        ));
        let progress = self.repository.audit_progress().await?;

        let entries: Vec<AuditEntry> = assets
            .into_iter()
            .map(|asset| {
                let audit_status = progress.get(&asset.id).copied().unwrap_or_default();
                AuditEntry { asset, audit_status }
            })
            .collect();
        let summary = AuditSummary::compute(entries.iter().map(|e| &e.audit_status));
        Ok(AuditReport { entries, summary })
    }

    /// Mark an asset found or missing. Marking the same result again clears it.
    pub async fn mark(&self, claims: &UserClaims, asset_id: &str, status: AuditStatus) -> AppResult<AuditStatus> {
        let asset = self.repository.assets_get_by_id(asset_id).await?;
        if !visibility::can_see(claims, &asset) {
            return Err(AppError::NotFound(format!("Asset {} not found", asset_id)));
        }
        self.repository.audit_mark(&asset.id, status).await
    }

    /// Clear count progress. Staff only clear their own department's assets.
    pub async fn reset(&self, claims: &UserClaims) -> AppResult<()> {
        match claims.scoped_department() {
            None => {
                self.repository.audit_reset().await?;
                tracing::info!("Audit progress reset");
            }
            Some(department) => {
                let assets = visibility::visible_assets(claims, self.repository.assets_list().await?);
                let ids: HashSet<&str> = assets.iter().map(|a| a.id.as_str()).collect();
                self.repository.audit_clear(&ids).await?;
                tracing::info!("Audit progress reset for department {}", department);
            }
        }
        Ok(())
    }

    pub async fn export_csv(&self, claims: &UserClaims, query: &AssetQuery) -> AppResult<String> {
        let report = self.report(claims, query).await?;
        Ok(export::audit_csv(&report.entries))
    }
}
