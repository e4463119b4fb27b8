//! Settings store: the singleton settings blob with an in-memory copy

use std::sync::Arc;

use reqwest::Url;
use tokio::sync::RwLock;

use super::LocalStore;
use crate::{error::AppResult, models::AppSettings};

const SETTINGS_KEY: &str = "Settings";

#[derive(Clone)]
pub struct SettingsStore {
    local: Arc<LocalStore>,
    current: Arc<RwLock<AppSettings>>,
}

impl SettingsStore {
    /// Load persisted settings. On first start the defaults are written, with
    /// `remote_url` as the initial remote endpoint.
    pub async fn load(local: Arc<LocalStore>, remote_url: Option<&str>) -> AppResult<Self> {
        let settings = match local.read_blob::<AppSettings>(SETTINGS_KEY).await? {
            Some(stored) => stored.with_fallbacks(),
            None => {
                let mut initial = AppSettings::default();
                if let Some(url) = remote_url {
                    initial.google_script_url = url.trim().to_string();
                }
                local.write_blob(SETTINGS_KEY, &initial).await?;
                tracing::info!("Initialized settings");
                initial
            }
        };

        Ok(Self {
            local,
            current: Arc::new(RwLock::new(settings)),
        })
    }

    pub async fn get(&self) -> AppSettings {
        self.current.read().await.clone()
    }

    pub async fn remote_endpoint(&self) -> Option<Url> {
        self.current.read().await.remote_endpoint()
    }

    /// Replace the settings wholesale
    pub async fn save(&self, settings: AppSettings) -> AppResult<AppSettings> {
        self.update(|current| *current = settings).await?;
        Ok(self.get().await)
    }

    /// Apply a change and persist it. The in-memory copy only changes once
    /// the blob has been written.
    pub async fn update<R>(&self, f: impl FnOnce(&mut AppSettings) -> R) -> AppResult<R> {
        let mut guard = self.current.write().await;
        let mut next = guard.clone();
        let result = f(&mut next);
        let next = next.with_fallbacks();
        self.local.write_blob(SETTINGS_KEY, &next).await?;
        *guard = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::DEFAULT_HOSPITAL_NAME;

    #[tokio::test]
    async fn remote_url_only_seeds_a_fresh_install() {
        let dir = tempfile::tempdir().unwrap();
        let local = Arc::new(LocalStore::open(dir.path()).await.unwrap());

        let store = SettingsStore::load(local.clone(), Some("https://example.org/exec")).await.unwrap();
        assert!(store.remote_endpoint().await.is_some());

        store.update(|s| s.google_script_url.clear()).await.unwrap();

        let reloaded = SettingsStore::load(local, Some("https://example.org/exec")).await.unwrap();
        assert!(reloaded.remote_endpoint().await.is_none());
    }

    #[tokio::test]
    async fn save_applies_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let local = Arc::new(LocalStore::open(dir.path()).await.unwrap());
        let store = SettingsStore::load(local, None).await.unwrap();

        let mut blank = AppSettings::default();
        blank.hospital_name = "  ".into();
        blank.departments.clear();
        let saved = store.save(blank).await.unwrap();

        assert_eq!(saved.hospital_name, DEFAULT_HOSPITAL_NAME);
        assert!(!saved.departments.is_empty());
    }
}
