//! Maintenance record methods on Repository

use super::{Collection, Repository};
use crate::{
    error::{AppError, AppResult},
    models::MaintenanceRecord,
};

impl Repository {
    pub async fn maintenance_list(&self) -> AppResult<Vec<MaintenanceRecord>> {
        self.list_records(Collection::Maintenance).await
    }

    pub async fn maintenance_get_by_id(&self, id: &str) -> AppResult<MaintenanceRecord> {
        self.maintenance_list()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Maintenance record {} not found", id)))
    }

    pub async fn maintenance_create(&self, record: &MaintenanceRecord) -> AppResult<()> {
        self.create_record(Collection::Maintenance, record).await
    }

    pub async fn maintenance_update(&self, record: &MaintenanceRecord) -> AppResult<()> {
        self.update_record(Collection::Maintenance, record).await
    }

    pub async fn maintenance_delete(&self, id: &str) -> AppResult<()> {
        self.delete_record(Collection::Maintenance, id).await
    }
}
