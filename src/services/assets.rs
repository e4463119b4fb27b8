//! Asset registry service

use validator::Validate;

use super::{export, generate_id, visibility};
use crate::{
    error::{AppError, AppResult},
    models::{
        asset::{AssetInput, AssetQuery},
        Asset, UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AssetsService {
    repository: Repository,
}

impl AssetsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Assets visible to the caller, filtered by the query
    pub async fn list(&self, claims: &UserClaims, query: &AssetQuery) -> AppResult<Vec<Asset>> {
        let assets = self.repository.assets_list().await?;
        Ok(query.apply(visibility::visible_assets(claims, assets)))
    }

    pub async fn get(&self, claims: &UserClaims, id: &str) -> AppResult<Asset> {
        let asset = self.repository.assets_get_by_id(id).await?;
        if !visibility::can_see(claims, &asset) {
            return Err(AppError::NotFound(format!("Asset {} not found", id)));
        }
        Ok(asset)
    }

    /// Register a new asset. A blank id gets an `EQ-NNNN` id.
    pub async fn create(&self, claims: &UserClaims, input: AssetInput) -> AppResult<Asset> {
        let input = scoped_input(claims, input.normalized())?;
        input.validate()?;

        let id = input.id.clone().unwrap_or_else(|| generate_id("EQ", true));
        let asset = input.into_asset(id);
        self.repository.assets_create(&asset).await?;

        tracing::info!("Registered asset {} ({})", asset.id, asset.name);
        Ok(asset)
    }

    /// Replace an asset's fields. The id in the path wins over the body.
    pub async fn update(&self, claims: &UserClaims, id: &str, input: AssetInput) -> AppResult<Asset> {
        let input = scoped_input(claims, input.normalized())?;
        input.validate()?;

        self.get(claims, id).await?;
        let asset = input.into_asset(id.to_string());
        self.repository.assets_update(&asset).await?;
        Ok(asset)
    }

    /// Delete an asset. Records referencing it are kept.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.assets_delete(id).await?;
        tracing::info!("Deleted asset {}", id);
        Ok(())
    }

    pub async fn export_csv(&self, claims: &UserClaims, query: &AssetQuery) -> AppResult<String> {
        let assets = self.list(claims, query).await?;
        Ok(export::assets_csv(&assets))
    }
}

/// Staff may only place assets in their own department. A blank department
/// is filled with it.
fn scoped_input(claims: &UserClaims, mut input: AssetInput) -> AppResult<AssetInput> {
    if let Some(department) = claims.scoped_department() {
        if input.department.is_empty() {
            input.department = department.to_string();
        } else if input.department != department {
            return Err(AppError::Authorization(format!(
                "Assets can only be registered in department {}",
                department
            )));
        }
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::AssetStatus, services::testing};

    #[tokio::test]
    async fn create_requires_name_and_serial() {
        let ctx = testing::context().await;
        let service = AssetsService::new(ctx.repository.clone());
        let admin = testing::admin();

        let missing_serial = AssetInput { name: "Monitor".into(), ..Default::default() };
        let err = service.create(&admin, missing_serial).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let blank_name = AssetInput {
            name: "   ".into(),
            serial_number: "SN-1".into(),
            ..Default::default()
        };
        assert!(service.create(&admin, blank_name).await.is_err());

        assert!(ctx.repository.assets_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_id_is_generated() {
        let ctx = testing::context().await;
        let service = AssetsService::new(ctx.repository.clone());

        let asset = service
            .create(&testing::admin(), AssetInput {
                id: Some(" ".into()),
                name: "Suction Pump".into(),
                serial_number: "SP-1".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(asset.id.starts_with("EQ-"));
        assert_eq!(asset.id.len(), 7);
        assert!(asset.id[3..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(asset.status, AssetStatus::Active);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let ctx = testing::context().await;
        let service = AssetsService::new(ctx.repository.clone());
        let input = AssetInput {
            id: Some("EQ-100".into()),
            name: "Pump".into(),
            serial_number: "P-1".into(),
            ..Default::default()
        };

        service.create(&testing::admin(), input.clone()).await.unwrap();
        let err = service.create(&testing::admin(), input).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn staff_cannot_read_other_departments() {
        let ctx = testing::context().await;
        let service = AssetsService::new(ctx.repository.clone());
        testing::add_asset(&ctx.repository, "EQ-1", "ER", AssetStatus::Active, None).await;

        let icu = testing::staff("ICU");
        assert!(matches!(service.get(&icu, "EQ-1").await, Err(AppError::NotFound(_))));
        assert!(service.get(&testing::admin(), "EQ-1").await.is_ok());
    }

    #[tokio::test]
    async fn staff_keep_assets_in_their_department() {
        let ctx = testing::context().await;
        let service = AssetsService::new(ctx.repository.clone());
        let icu = testing::staff("ICU");
        let input = |department: &str| AssetInput {
            name: "Ventilator".into(),
            serial_number: "VT-1".into(),
            department: department.into(),
            ..Default::default()
        };

        let err = service.create(&icu, input("ER")).await.unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
        assert!(ctx.repository.assets_list().await.unwrap().is_empty());

        let asset = service.create(&icu, input("")).await.unwrap();
        assert_eq!(asset.department, "ICU");

        let err = service.update(&icu, &asset.id, input("ER")).await.unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
        assert_eq!(
            ctx.repository.assets_get_by_id(&asset.id).await.unwrap().department,
            "ICU"
        );

        let moved = service.update(&testing::admin(), &asset.id, input("ER")).await.unwrap();
        assert_eq!(moved.department, "ER");
    }
}
