//! Settings service

use crate::{
    error::AppResult,
    models::{settings::PublicSettings, AppSettings},
    repository::{Repository, StorageMode},
};

#[derive(Clone)]
pub struct SettingsService {
    repository: Repository,
}

impl SettingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_settings(&self) -> AppSettings {
        self.repository.settings.get().await
    }

    pub async fn public_settings(&self) -> PublicSettings {
        self.repository.settings.get().await.public_view()
    }

    pub async fn update_settings(&self, settings: AppSettings) -> AppResult<AppSettings> {
        let saved = self.repository.settings.save(settings).await?;
        tracing::info!(
            "Settings updated, storage mode is now {:?}",
            self.repository.storage_mode().await
        );
        Ok(saved)
    }

    /// Append a department. Blank and duplicate names leave the list unchanged.
    pub async fn add_department(&self, name: &str) -> AppResult<Vec<String>> {
        self.repository
            .settings
            .update(|s| {
                s.add_department(name);
                s.departments.iter().cloned().collect()
            })
            .await
    }

    pub async fn remove_department(&self, name: &str) -> AppResult<Vec<String>> {
        self.repository
            .settings
            .update(|s| {
                s.remove_department(name);
                s.departments.iter().cloned().collect()
            })
            .await
    }

    pub async fn storage_mode(&self) -> StorageMode {
        self.repository.storage_mode().await
    }
}
