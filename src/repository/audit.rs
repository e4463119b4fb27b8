//! Audit progress methods on Repository (local store only)

use std::collections::HashSet;

use super::Repository;
use crate::{
    error::AppResult,
    models::{
        audit::{self, AuditProgress},
        AuditStatus,
    },
};

const AUDIT_KEY: &str = "AuditProgress";

impl Repository {
    pub async fn audit_progress(&self) -> AppResult<AuditProgress> {
        Ok(self.local().read_blob(AUDIT_KEY).await?.unwrap_or_default())
    }

    /// Toggle an asset's count result and return the new status
    pub async fn audit_mark(&self, asset_id: &str, requested: AuditStatus) -> AppResult<AuditStatus> {
        self.local()
            .modify(AUDIT_KEY, AuditProgress::new, |progress: &mut AuditProgress| {
                let current = progress.get(asset_id).copied().unwrap_or_default();
                let next = audit::toggle(current, requested);
                if next == AuditStatus::Unchecked {
                    progress.remove(asset_id);
                } else {
                    progress.insert(asset_id.to_string(), next);
                }
                Ok(next)
            })
            .await
    }

    pub async fn audit_reset(&self) -> AppResult<()> {
        self.local().remove_blob(AUDIT_KEY).await
    }

    /// Clear the count results of the given assets only
    pub async fn audit_clear(&self, asset_ids: &HashSet<&str>) -> AppResult<()> {
        self.local()
            .modify(AUDIT_KEY, AuditProgress::new, |progress: &mut AuditProgress| {
                progress.retain(|id, _| !asset_ids.contains(id.as_str()));
                Ok(())
            })
            .await
    }
}
