//! Daily inspection check service

use std::sync::Arc;

use super::{
    generate_id,
    notifier::{messages, Notifier},
    today, visibility,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        check::{CheckQuery, CreateCheck, DailySummary, DailySummaryRequest},
        CheckRecord, CheckStatus, UserClaims,
    },
    repository::Repository,
};

/// Department shown when the sender has none
const UNSPECIFIED_DEPARTMENT: &str = "ไม่ระบุ";

#[derive(Clone)]
pub struct ChecksService {
    repository: Repository,
    notifier: Arc<dyn Notifier>,
}

impl ChecksService {
    pub fn new(repository: Repository, notifier: Arc<dyn Notifier>) -> Self {
        Self { repository, notifier }
    }

    /// Checks on visible assets, optionally for a single day
    pub async fn list(&self, claims: &UserClaims, query: &CheckQuery) -> AppResult<Vec<CheckRecord>> {
        let assets = self.repository.assets_list().await?;
        let mut checks = visibility::visible_records(
            claims,
            &assets,
            self.repository.checks_list().await?,
            |c| c.asset_id.as_str(),
        );
        if let Some(date) = query.date {
            checks.retain(|c| c.date == date);
        }
        Ok(checks)
    }

    /// Record a daily check. A failed item must carry a note. A failed check
    /// raises a notification listing the failed items.
    pub async fn create(&self, claims: &UserClaims, data: CreateCheck) -> AppResult<CheckRecord> {
        if let Some(label) = data.checklist.missing_note() {
            return Err(AppError::Validation(format!(
                "Please describe the problem found with {}",
                label
            )));
        }

        let asset = self.repository.assets_get_by_id(&data.asset_id).await?;
        if !visibility::can_see(claims, &asset) {
            return Err(AppError::NotFound(format!("Asset {} not found", data.asset_id)));
        }

        let status = data.checklist.overall_status();
        let checker_name = match data.checker_name.trim() {
            "" => claims.sub.clone(),
            name => name.to_string(),
        };
        let notes = match status {
            CheckStatus::Fail => data.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            CheckStatus::Pass => None,
        };

        let check = CheckRecord {
            id: generate_id("CHK", false),
            asset_id: asset.id,
            asset_name: asset.name,
            date: data.date.unwrap_or_else(today),
            checker_name,
            check_type: "Daily".to_string(),
            status,
            notes,
            checklist_details: Some(data.checklist),
        };
        self.repository.checks_create(&check).await?;

        if check.status == CheckStatus::Fail {
            tracing::info!("Check {} failed for asset {}", check.id, check.asset_id);
            self.notifier.notify(&messages::check_failed(&check)).await;
        }
        Ok(check)
    }

    /// Summarize today's checks for the caller's scope and send the summary
    pub async fn send_daily_summary(
        &self,
        claims: &UserClaims,
        request: DailySummaryRequest,
    ) -> AppResult<DailySummary> {
        let date = today();
        let checks = self.list(claims, &CheckQuery { date: Some(date) }).await?;
        if checks.is_empty() {
            return Err(AppError::Validation("No checks have been recorded today".to_string()));
        }

        let failed_items: Vec<String> = checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .map(|c| c.asset_name.clone())
            .collect();
        let checker = request
            .checker_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| claims.sub.clone());

        let summary = DailySummary {
            department: claims
                .department
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| UNSPECIFIED_DEPARTMENT.to_string()),
            checker,
            date,
            total: checks.len(),
            fail_count: failed_items.len(),
            failed_items,
        };
        self.notifier.notify(&messages::daily_summary(&summary)).await;
        Ok(summary)
    }
}
