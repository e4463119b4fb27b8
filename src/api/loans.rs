//! Loan endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        loan::{CreateLoan, LoanDetails, ReturnLoan},
        Asset, LoanRecord,
    },
};

use super::AuthenticatedUser;

/// List loans
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Loans on visible assets", body = Vec<LoanDetails>)
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.list(&claims).await?;
    Ok(Json(loans))
}

/// Assets that can be lent out
#[utoipa::path(
    get,
    path = "/loans/available-assets",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active visible assets", body = Vec<Asset>)
    )
)]
pub async fn available_assets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.loans.available_assets(&claims).await?;
    Ok(Json(assets))
}

/// Lend an asset
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanRecord),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Asset is not available", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<LoanRecord>)> {
    let loan = state.services.loans.create_loan(&claims, data).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Return a loaned asset
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Loan ID")),
    request_body(content = ReturnLoan, description = "Optional return date"),
    responses(
        (status = 200, description = "Loan returned", body = LoanRecord),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Loan already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    data: Option<Json<ReturnLoan>>,
) -> AppResult<Json<LoanRecord>> {
    let data = data.map(|Json(d)| d).unwrap_or_default();
    let loan = state.services.loans.return_loan(&claims, &id, data).await?;
    Ok(Json(loan))
}
