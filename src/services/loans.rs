//! Loan (borrow / return) service

use super::{generate_id, today, visibility};
use crate::{
    error::{AppError, AppResult},
    models::{
        loan::{CreateLoan, LoanDetails, ReturnLoan},
        Asset, AssetStatus, LoanRecord, LoanStatus, UserClaims,
    },
    repository::Repository,
};

const UNSPECIFIED_DEPARTMENT: &str = "ไม่ระบุ";

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Visible loans with their overdue flag
    pub async fn list(&self, claims: &UserClaims) -> AppResult<Vec<LoanDetails>> {
        let assets = self.repository.assets_list().await?;
        let today = today();
        Ok(visibility::visible_records(
            claims,
            &assets,
            self.repository.loans_list().await?,
            |l| l.asset_id.as_str(),
        )
        .into_iter()
        .map(|loan| LoanDetails::new(loan, today))
        .collect())
    }

    /// Visible assets that can be lent out right now
    pub async fn available_assets(&self, claims: &UserClaims) -> AppResult<Vec<Asset>> {
        let assets = self.repository.assets_list().await?;
        Ok(visibility::visible_assets(claims, assets)
            .into_iter()
            .filter(|a| a.status == AssetStatus::Active)
            .collect())
    }

    /// Lend an active asset. The asset is marked Loaned.
    pub async fn create_loan(&self, claims: &UserClaims, data: CreateLoan) -> AppResult<LoanRecord> {
        let borrower_name = data.borrower_name.trim().to_string();
        if borrower_name.is_empty() {
            return Err(AppError::Validation("Borrower name is required".to_string()));
        }

        let mut asset = self.repository.assets_get_by_id(data.asset_id.trim()).await?;
        if !visibility::can_see(claims, &asset) {
            return Err(AppError::NotFound(format!("Asset {} not found", data.asset_id)));
        }
        if asset.status != AssetStatus::Active {
            return Err(AppError::BusinessRule(format!(
                "Asset {} is not available for loan (status: {})",
                asset.id, asset.status
            )));
        }

        let loan_date = data.loan_date.unwrap_or_else(today);
        if data.due_date.is_some_and(|due| due < loan_date) {
            return Err(AppError::Validation("Due date is before the loan date".to_string()));
        }

        let loan = LoanRecord {
            id: generate_id("LN", false),
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            borrower_name,
            department: data
                .department
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| UNSPECIFIED_DEPARTMENT.to_string()),
            loan_date,
            due_date: data.due_date,
            return_date: None,
            status: LoanStatus::Active,
        };
        self.repository.loans_create(&loan).await?;

        asset.status = AssetStatus::Loaned;
        if let Err(e) = self.repository.assets_update(&asset).await {
            if let Err(undo) = self.repository.loans_delete(&loan.id).await {
                tracing::error!("Could not withdraw loan {}: {}", loan.id, undo);
            }
            return Err(e);
        }

        tracing::info!("Asset {} lent to {} ({})", asset.id, loan.borrower_name, loan.id);
        Ok(loan)
    }

    /// Close a loan and put the asset back into service
    pub async fn return_loan(&self, claims: &UserClaims, id: &str, data: ReturnLoan) -> AppResult<LoanRecord> {
        let assets = self.repository.assets_list().await?;
        let mut loan = visibility::visible_records(
            claims,
            &assets,
            self.repository.loans_list().await?,
            |l| l.asset_id.as_str(),
        )
        .into_iter()
        .find(|l| l.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))?;

        if loan.status == LoanStatus::Returned {
            return Err(AppError::Conflict(format!("Loan {} has already been returned", id)));
        }

        loan.status = LoanStatus::Returned;
        loan.return_date = Some(data.return_date.unwrap_or_else(today));
        self.repository.loans_update(&loan).await?;

        match assets.into_iter().find(|a| a.id == loan.asset_id) {
            Some(mut asset) if asset.status == AssetStatus::Loaned => {
                asset.status = AssetStatus::Active;
                self.repository.assets_update(&asset).await?;
            }
            Some(asset) => {
                tracing::warn!(
                    "Loan {} returned but asset {} is {}, status left unchanged",
                    loan.id,
                    asset.id,
                    asset.status
                );
            }
            None => {
                tracing::warn!("Loan {} refers to missing asset {}", loan.id, loan.asset_id);
            }
        }

        tracing::info!("Loan {} returned", loan.id);
        Ok(loan)
    }
}
