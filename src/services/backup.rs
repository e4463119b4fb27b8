//! Full data backup and restore

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::backup::BackupDocument,
    repository::{Collection, Repository, StorageMode},
};

#[derive(Clone)]
pub struct BackupService {
    repository: Repository,
}

impl BackupService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Snapshot every collection from the active backend
    pub async fn export(&self) -> AppResult<BackupDocument> {
        Ok(BackupDocument {
            assets: Some(self.repository.assets_list().await?),
            checks: Some(self.repository.checks_list().await?),
            maintenance: Some(self.repository.maintenance_list().await?),
            loans: Some(self.repository.loans_list().await?),
            timestamp: Some(Utc::now()),
        })
    }

    /// Replace the local collections present in the document. Returns the
    /// names of the collections that were restored.
    pub async fn import(&self, document: BackupDocument) -> AppResult<Vec<String>> {
        if self.repository.storage_mode().await == StorageMode::Remote {
            return Err(AppError::BusinessRule(
                "Import is only supported with local storage".to_string(),
            ));
        }

        let mut restored = Vec::new();
        if let Some(assets) = &document.assets {
            self.repository.replace_local(Collection::Assets, assets).await?;
            restored.push(Collection::Assets.to_string());
        }
        if let Some(checks) = &document.checks {
            self.repository.replace_local(Collection::Checks, checks).await?;
            restored.push(Collection::Checks.to_string());
        }
        if let Some(maintenance) = &document.maintenance {
            self.repository.replace_local(Collection::Maintenance, maintenance).await?;
            restored.push(Collection::Maintenance.to_string());
        }
        if let Some(loans) = &document.loans {
            self.repository.replace_local(Collection::Loans, loans).await?;
            restored.push(Collection::Loans.to_string());
        }

        tracing::info!("Restored backup: {}", restored.join(", "));
        Ok(restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing;

    #[tokio::test]
    async fn import_replaces_only_present_collections() {
        let ctx = testing::sample_context().await;
        let service = BackupService::new(ctx.repository.clone());

        let mut document = service.export().await.unwrap();
        assert_eq!(document.assets.as_ref().map(Vec::len), Some(5));

        document.assets = Some(Vec::new());
        document.loans = None;
        let restored = service.import(document).await.unwrap();

        assert_eq!(restored, vec!["Assets", "Checks", "Maintenance"]);
        assert!(ctx.repository.assets_list().await.unwrap().is_empty());
        assert_eq!(ctx.repository.loans_list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn import_is_refused_in_remote_mode() {
        let ctx = testing::context().await;
        ctx.repository
            .settings
            .update(|s| s.google_script_url = "https://script.google.com/macros/s/x/exec".into())
            .await
            .unwrap();
        let service = BackupService::new(ctx.repository.clone());

        let document = BackupDocument {
            assets: Some(Vec::new()),
            checks: None,
            maintenance: None,
            loans: None,
            timestamp: None,
        };
        assert!(matches!(service.import(document).await, Err(AppError::BusinessRule(_))));
    }
}
