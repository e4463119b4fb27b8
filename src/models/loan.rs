//! Loan (borrow / return) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{enums::LoanStatus, sheet};

/// Loan record as stored in the `Loans` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    #[serde(deserialize_with = "sheet::text")]
    pub id: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub asset_id: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub asset_name: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub borrower_name: String,
    /// Borrowing department
    #[serde(deserialize_with = "sheet::text", default)]
    pub department: String,
    #[serde(with = "sheet::date")]
    #[schema(value_type = String, format = Date)]
    pub loan_date: NaiveDate,
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

impl LoanRecord {
    /// Past due and not yet returned. Computed, never written back.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.due_date.is_some_and(|due| due < today)
    }
}

/// Loan with computed flags for display
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    #[serde(flatten)]
    pub loan: LoanRecord,
    pub is_overdue: bool,
}

impl LoanDetails {
    pub fn new(loan: LoanRecord, today: NaiveDate) -> Self {
        let is_overdue = loan.is_overdue(today);
        Self { loan, is_overdue }
    }
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoan {
    pub asset_id: String,
    #[serde(default)]
    pub borrower_name: String,
    #[serde(default)]
    pub department: Option<String>,
    /// Defaults to today
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub loan_date: Option<NaiveDate>,
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
}

/// Return request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLoan {
    /// Defaults to today
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub return_date: Option<NaiveDate>,
}
