//! Loan methods on Repository

use super::{Collection, Repository};
use crate::{
    error::{AppError, AppResult},
    models::LoanRecord,
};

impl Repository {
    pub async fn loans_list(&self) -> AppResult<Vec<LoanRecord>> {
        self.list_records(Collection::Loans).await
    }

    pub async fn loans_get_by_id(&self, id: &str) -> AppResult<LoanRecord> {
        self.loans_list()
            .await?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
    }

    pub async fn loans_create(&self, loan: &LoanRecord) -> AppResult<()> {
        self.create_record(Collection::Loans, loan).await
    }

    pub async fn loans_update(&self, loan: &LoanRecord) -> AppResult<()> {
        self.update_record(Collection::Loans, loan).await
    }

    pub async fn loans_delete(&self, id: &str) -> AppResult<()> {
        self.delete_record(Collection::Loans, id).await
    }
}
