//! Asset domain methods on Repository

use super::{Collection, Repository};
use crate::{
    error::{AppError, AppResult},
    models::Asset,
};

impl Repository {
    /// List all assets, newest first
    pub async fn assets_list(&self) -> AppResult<Vec<Asset>> {
        self.list_records(Collection::Assets).await
    }

    /// Get asset by ID
    pub async fn assets_get_by_id(&self, id: &str) -> AppResult<Asset> {
        self.assets_list()
            .await?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Asset {} not found", id)))
    }

    pub async fn assets_create(&self, asset: &Asset) -> AppResult<()> {
        self.create_record(Collection::Assets, asset).await
    }

    pub async fn assets_update(&self, asset: &Asset) -> AppResult<()> {
        self.update_record(Collection::Assets, asset).await
    }

    pub async fn assets_delete(&self, id: &str) -> AppResult<()> {
        self.delete_record(Collection::Assets, id).await
    }
}
