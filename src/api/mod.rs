//! API handlers for MedEquip REST endpoints

pub mod assets;
pub mod audit;
pub mod auth;
pub mod backup;
pub mod checks;
pub mod health;
pub mod loans;
pub mod maintenance;
pub mod openapi;
pub mod settings;
pub mod stats;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE},
        request::Parts,
    },
    response::{IntoResponse, Response},
};

use crate::{error::AppError, models::user::UserClaims, services::today, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// CSV download named `<stem>_<YYYY-MM-DD>.csv`
pub struct CsvFile {
    stem: &'static str,
    body: String,
}

impl CsvFile {
    pub fn new(stem: &'static str, body: String) -> Self {
        Self { stem, body }
    }
}

impl IntoResponse for CsvFile {
    fn into_response(self) -> Response {
        let disposition = format!(
            "attachment; filename=\"{}_{}.csv\"",
            self.stem,
            today().format("%Y-%m-%d")
        );
        (
            [
                (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}
