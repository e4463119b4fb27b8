//! Application settings endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        settings::{DepartmentRequest, PublicSettings},
        AppSettings,
    },
};

use super::AuthenticatedUser;

/// Branding and departments for the login screen
#[utoipa::path(
    get,
    path = "/settings/public",
    tag = "settings",
    responses(
        (status = 200, description = "Public settings", body = PublicSettings)
    )
)]
pub async fn get_public_settings(State(state): State<crate::AppState>) -> Json<PublicSettings> {
    Json(state.services.settings.public_settings().await)
}

/// Get all settings (admin only)
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current settings", body = AppSettings),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_settings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<AppSettings>> {
    claims.require_admin()?;
    Ok(Json(state.services.settings.get_settings().await))
}

/// Replace the settings (admin only)
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = AppSettings,
    responses(
        (status = 200, description = "Saved settings", body = AppSettings),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_settings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(settings): Json<AppSettings>,
) -> AppResult<Json<AppSettings>> {
    claims.require_admin()?;
    let saved = state.services.settings.update_settings(settings).await?;
    Ok(Json(saved))
}

/// Add a department (admin only)
#[utoipa::path(
    post,
    path = "/settings/departments",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = DepartmentRequest,
    responses(
        (status = 200, description = "Updated department list", body = Vec<String>)
    )
)]
pub async fn add_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<DepartmentRequest>,
) -> AppResult<Json<Vec<String>>> {
    claims.require_admin()?;
    let departments = state.services.settings.add_department(&request.name).await?;
    Ok(Json(departments))
}

/// Remove a department (admin only)
#[utoipa::path(
    delete,
    path = "/settings/departments/{name}",
    tag = "settings",
    security(("bearer_auth" = [])),
    params(("name" = String, Path, description = "Department name")),
    responses(
        (status = 200, description = "Updated department list", body = Vec<String>)
    )
)]
pub async fn remove_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    claims.require_admin()?;
    let departments = state.services.settings.remove_department(&name).await?;
    Ok(Json(departments))
}
