//! Maintenance service: repair requests, PM reports and PM alerts

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    export, generate_id,
    notifier::{messages, Notifier},
    today, visibility,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        maintenance::{CreateMaintenance, MaintenanceMode, MaintenanceSummary, PmScheduleEntry},
        AssetStatus, MaintenanceRecord, MaintenanceStatus, MaintenanceType, UserClaims,
    },
    repository::Repository,
};

const DEFAULT_TECHNICIAN: &str = "Pending Assignment";
/// Days ahead covered by PM alerts, both ends included
const PM_ALERT_WINDOW_DAYS: i64 = 7;
const PM_SCHEDULE_LEN: usize = 5;

/// Accept only `data:<type>;base64,<payload>` with a decodable payload
fn validate_attachment(uri: &str) -> AppResult<()> {
    let invalid = || AppError::Validation("Attachment must be a base64 data URI".to_string());
    let rest = uri.strip_prefix("data:").ok_or_else(invalid)?;
    let (meta, payload) = rest.split_once(',').ok_or_else(invalid)?;
    if !meta.ends_with(";base64") {
        return Err(invalid());
    }
    STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
    Ok(())
}

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
    notifier: Arc<dyn Notifier>,
}

impl MaintenanceService {
    pub fn new(repository: Repository, notifier: Arc<dyn Notifier>) -> Self {
        Self { repository, notifier }
    }

    pub async fn list(&self, claims: &UserClaims) -> AppResult<Vec<MaintenanceRecord>> {
        let assets = self.repository.assets_list().await?;
        Ok(visibility::visible_records(
            claims,
            &assets,
            self.repository.maintenance_list().await?,
            |r| r.asset_id.as_str(),
        ))
    }

    /// File a repair request (CM, asset goes under repair) or a completed PM report
    pub async fn create(&self, claims: &UserClaims, data: CreateMaintenance) -> AppResult<MaintenanceRecord> {
        if data.asset_id.trim().is_empty() {
            return Err(AppError::Validation("Asset is required".to_string()));
        }
        let description = data.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        if data.cost < Decimal::ZERO {
            return Err(AppError::Validation("Cost cannot be negative".to_string()));
        }
        let attachment_url = data.attachment_url.filter(|a| !a.trim().is_empty());
        if let Some(uri) = &attachment_url {
            validate_attachment(uri)?;
        }

        let mut asset = self.repository.assets_get_by_id(data.asset_id.trim()).await?;
        if !visibility::can_see(claims, &asset) {
            return Err(AppError::NotFound(format!("Asset {} not found", data.asset_id)));
        }

        let (maintenance_type, status) = match data.mode {
            MaintenanceMode::Repair => (MaintenanceType::CM, MaintenanceStatus::Pending),
            MaintenanceMode::Pm => (MaintenanceType::PM, MaintenanceStatus::Completed),
        };
        let record = MaintenanceRecord {
            id: generate_id("MT", false),
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            maintenance_type,
            request_date: data.request_date.unwrap_or_else(today),
            technician: data
                .technician
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TECHNICIAN.to_string()),
            description,
            cost: data.cost,
            attachment_url,
            status,
        };
        self.repository.maintenance_create(&record).await?;

        if data.mode == MaintenanceMode::Repair {
            asset.status = AssetStatus::Repair;
            if let Err(e) = self.repository.assets_update(&asset).await {
                // Withdraw the request, the asset never entered repair
                if let Err(undo) = self.repository.maintenance_delete(&record.id).await {
                    tracing::error!("Could not withdraw repair request {}: {}", record.id, undo);
                }
                return Err(e);
            }
            tracing::info!("Repair requested for asset {} ({})", asset.id, record.id);
            self.notifier.notify(&messages::repair_requested(&record)).await;
        } else {
            tracing::info!("PM report {} recorded for asset {}", record.id, asset.id);
        }

        Ok(record)
    }

    /// Set a record's status. Completing a repair brings the asset back into
    /// service if it is still marked under repair.
    pub async fn update_status(
        &self,
        claims: &UserClaims,
        id: &str,
        status: MaintenanceStatus,
    ) -> AppResult<MaintenanceRecord> {
        let mut record = self
            .list(claims)
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Maintenance record {} not found", id)))?;

        record.status = status;
        self.repository.maintenance_update(&record).await?;

        if status == MaintenanceStatus::Completed && record.maintenance_type == MaintenanceType::CM {
            match self.repository.assets_get_by_id(&record.asset_id).await {
                Ok(mut asset) if asset.status == AssetStatus::Repair => {
                    asset.status = AssetStatus::Active;
                    self.repository.assets_update(&asset).await?;
                    tracing::info!("Asset {} back in service after {}", asset.id, record.id);
                }
                Ok(_) => {}
                Err(AppError::NotFound(_)) => {
                    tracing::warn!("Repair {} refers to missing asset {}", record.id, record.asset_id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(record)
    }

    /// Cost totals, status counts and the next PM dates
    pub async fn summary(&self, claims: &UserClaims) -> AppResult<MaintenanceSummary> {
        let all_assets = self.repository.assets_list().await?;
        let records = visibility::visible_records(
            claims,
            &all_assets,
            self.repository.maintenance_list().await?,
            |r| r.asset_id.as_str(),
        );
        let assets = visibility::visible_assets(claims, all_assets);
        Ok(summarize(&records, &assets, today()))
    }

    /// Notify about every asset whose next PM falls within the coming week
    pub async fn check_upcoming_pms(&self) -> AppResult<usize> {
        self.check_upcoming_pms_on(today()).await
    }

    pub async fn check_upcoming_pms_on(&self, today: NaiveDate) -> AppResult<usize> {
        let assets = self.repository.assets_list().await?;
        let mut count = 0;
        for asset in &assets {
            let Some(due) = asset.next_pm_date else { continue };
            let days_left = (due - today).num_days();
            if (0..=PM_ALERT_WINDOW_DAYS).contains(&days_left) {
                self.notifier
                    .notify(&messages::upcoming_pm(asset, due, days_left))
                    .await;
                count += 1;
            }
        }
        tracing::info!("Sent {} upcoming PM alerts", count);
        Ok(count)
    }

    pub async fn export_csv(&self, claims: &UserClaims) -> AppResult<String> {
        Ok(export::maintenance_csv(&self.list(claims).await?))
    }
}

fn summarize(
    records: &[MaintenanceRecord],
    assets: &[crate::models::Asset],
    today: NaiveDate,
) -> MaintenanceSummary {
    let cost_of = |kind: MaintenanceType| -> Decimal {
        records
            .iter()
            .filter(|r| r.maintenance_type == kind)
            .map(|r| r.cost)
            .sum()
    };
    let count_of = |status: MaintenanceStatus| records.iter().filter(|r| r.status == status).count();

    let mut scheduled: Vec<PmScheduleEntry> = assets
        .iter()
        .filter_map(|a| {
            a.next_pm_date.map(|next_pm_date| PmScheduleEntry {
                asset_id: a.id.clone(),
                asset_name: a.name.clone(),
                department: a.department.clone(),
                next_pm_date,
                is_overdue: next_pm_date < today,
            })
        })
        .collect();
    scheduled.sort_by_key(|e| e.next_pm_date);
    scheduled.truncate(PM_SCHEDULE_LEN);

    MaintenanceSummary {
        total_repair_cost: cost_of(MaintenanceType::CM),
        total_pm_cost: cost_of(MaintenanceType::PM),
        pending: count_of(MaintenanceStatus::Pending),
        in_progress: count_of(MaintenanceStatus::InProgress),
        completed: count_of(MaintenanceStatus::Completed),
        pm_schedule: scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{notifier::MockNotifier, testing};
    use chrono::Duration;

    fn request(mode: MaintenanceMode) -> CreateMaintenance {
        CreateMaintenance {
            mode,
            asset_id: "EQ-1".into(),
            technician: None,
            description: "Screen flickers".into(),
            request_date: None,
            cost: Decimal::new(1500, 0),
            attachment_url: None,
        }
    }

    fn silent() -> Arc<dyn Notifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        Arc::new(notifier)
    }

    #[test]
    fn attachment_must_be_base64_data_uri() {
        assert!(validate_attachment("data:application/pdf;base64,JVBERi0xLjQK").is_ok());
        assert!(validate_attachment("https://example.org/report.pdf").is_err());
        assert!(validate_attachment("data:text/plain,hello").is_err());
        assert!(validate_attachment("data:image/png;base64,%%%").is_err());
    }

    #[tokio::test]
    async fn repair_request_puts_asset_under_repair() {
        let ctx = testing::context().await;
        testing::add_asset(&ctx.repository, "EQ-1", "ER", AssetStatus::Active, None).await;
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text| text.contains("Screen flickers") && text.contains("Pending Assignment"))
            .times(1)
            .return_const(());
        let service = MaintenanceService::new(ctx.repository.clone(), Arc::new(notifier));

        let record = service.create(&testing::admin(), request(MaintenanceMode::Repair)).await.unwrap();

        assert_eq!(record.maintenance_type, MaintenanceType::CM);
        assert_eq!(record.status, MaintenanceStatus::Pending);
        let asset = ctx.repository.assets_get_by_id("EQ-1").await.unwrap();
        assert_eq!(asset.status, AssetStatus::Repair);
    }

    #[tokio::test]
    async fn pm_report_leaves_asset_alone() {
        let ctx = testing::context().await;
        testing::add_asset(&ctx.repository, "EQ-1", "ER", AssetStatus::Active, None).await;
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();
        let service = MaintenanceService::new(ctx.repository.clone(), Arc::new(notifier));

        let record = service.create(&testing::admin(), request(MaintenanceMode::Pm)).await.unwrap();

        assert_eq!(record.maintenance_type, MaintenanceType::PM);
        assert_eq!(record.status, MaintenanceStatus::Completed);
        let asset = ctx.repository.assets_get_by_id("EQ-1").await.unwrap();
        assert_eq!(asset.status, AssetStatus::Active);
    }

    #[tokio::test]
    async fn invalid_requests_are_not_saved() {
        let ctx = testing::context().await;
        testing::add_asset(&ctx.repository, "EQ-1", "ER", AssetStatus::Active, None).await;
        let service = MaintenanceService::new(ctx.repository.clone(), silent());

        let mut no_description = request(MaintenanceMode::Repair);
        no_description.description = " ".into();
        let mut negative = request(MaintenanceMode::Repair);
        negative.cost = Decimal::new(-1, 0);

        for data in [no_description, negative] {
            let err = service.create(&testing::admin(), data).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(ctx.repository.maintenance_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn completing_repair_reactivates_asset() {
        let ctx = testing::context().await;
        testing::add_asset(&ctx.repository, "EQ-1", "ER", AssetStatus::Active, None).await;
        let service = MaintenanceService::new(ctx.repository.clone(), silent());
        let admin = testing::admin();

        let record = service.create(&admin, request(MaintenanceMode::Repair)).await.unwrap();
        service
            .update_status(&admin, &record.id, MaintenanceStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(
            ctx.repository.assets_get_by_id("EQ-1").await.unwrap().status,
            AssetStatus::Repair
        );

        service
            .update_status(&admin, &record.id, MaintenanceStatus::Completed)
            .await
            .unwrap();
        assert_eq!(
            ctx.repository.assets_get_by_id("EQ-1").await.unwrap().status,
            AssetStatus::Active
        );
    }

    #[tokio::test]
    async fn pm_alerts_cover_the_coming_week() {
        let ctx = testing::context().await;
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        for (id, offset) in [("EQ-0", 0), ("EQ-7", 7), ("EQ-8", 8), ("EQ-past", -1)] {
            let due = today + Duration::days(offset);
            testing::add_asset(&ctx.repository, id, "ER", AssetStatus::Active, Some(due)).await;
        }
        testing::add_asset(&ctx.repository, "EQ-none", "ER", AssetStatus::Active, None).await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text| text.contains("(EQ-0)") || text.contains("(EQ-7)"))
            .times(2)
            .return_const(());
        let service = MaintenanceService::new(ctx.repository.clone(), Arc::new(notifier));

        assert_eq!(service.check_upcoming_pms_on(today).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn single_alert_for_the_asset_due_in_three_days() {
        let ctx = testing::context().await;
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        testing::add_asset(&ctx.repository, "EQ-A", "ER", AssetStatus::Active, Some(today + Duration::days(3))).await;
        testing::add_asset(&ctx.repository, "EQ-B", "ER", AssetStatus::Active, Some(today + Duration::days(10))).await;

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|text| text.contains("(EQ-A)") && text.contains("อีก 3 วัน"))
            .times(1)
            .return_const(());
        let service = MaintenanceService::new(ctx.repository.clone(), Arc::new(notifier));

        assert_eq!(service.check_upcoming_pms_on(today).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn summary_sums_costs_by_type() {
        let ctx = testing::context().await;
        let today = today();
        testing::add_asset(&ctx.repository, "EQ-1", "ER", AssetStatus::Active, Some(today - Duration::days(2))).await;
        let service = MaintenanceService::new(ctx.repository.clone(), silent());
        let admin = testing::admin();

        service.create(&admin, request(MaintenanceMode::Repair)).await.unwrap();
        let mut pm = request(MaintenanceMode::Pm);
        pm.cost = Decimal::new(250, 0);
        service.create(&admin, pm).await.unwrap();

        let summary = service.summary(&admin).await.unwrap();
        assert_eq!(summary.total_repair_cost, Decimal::new(1500, 0));
        assert_eq!(summary.total_pm_cost, Decimal::new(250, 0));
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pm_schedule.len(), 1);
        assert!(summary.pm_schedule[0].is_overdue);
    }
}
