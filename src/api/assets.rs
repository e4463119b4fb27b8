//! Asset registry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        asset::{AssetInput, AssetQuery},
        Asset,
    },
};

use super::{AuthenticatedUser, CsvFile};

/// List assets
#[utoipa::path(
    get,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "Visible assets", body = Vec<Asset>)
    )
)]
pub async fn list_assets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<Json<Vec<Asset>>> {
    let assets = state.services.assets.list(&claims, &query).await?;
    Ok(Json(assets))
}

/// Get asset by ID
#[utoipa::path(
    get,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Asset ID")),
    responses(
        (status = 200, description = "Asset details", body = Asset),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.assets.get(&claims, &id).await?;
    Ok(Json(asset))
}

/// Register an asset
#[utoipa::path(
    post,
    path = "/assets",
    tag = "assets",
    security(("bearer_auth" = [])),
    request_body = AssetInput,
    responses(
        (status = 201, description = "Asset created", body = Asset),
        (status = 400, description = "Name or serial number missing", body = crate::error::ErrorResponse),
        (status = 403, description = "Department outside the caller's scope", body = crate::error::ErrorResponse),
        (status = 409, description = "Asset ID already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_asset(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<AssetInput>,
) -> AppResult<(StatusCode, Json<Asset>)> {
    let asset = state.services.assets.create(&claims, data).await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// Replace an asset
#[utoipa::path(
    put,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Asset ID")),
    request_body = AssetInput,
    responses(
        (status = 200, description = "Asset updated", body = Asset),
        (status = 403, description = "Department outside the caller's scope", body = crate::error::ErrorResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_asset(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(data): Json<AssetInput>,
) -> AppResult<Json<Asset>> {
    let asset = state.services.assets.update(&claims, &id, data).await?;
    Ok(Json(asset))
}

/// Delete an asset (admin only)
#[utoipa::path(
    delete,
    path = "/assets/{id}",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Asset ID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_asset(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;
    state.services.assets.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Export the asset registry as CSV
#[utoipa::path(
    get,
    path = "/assets/export",
    tag = "assets",
    security(("bearer_auth" = [])),
    params(AssetQuery),
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String)
    )
)]
pub async fn export_assets(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<AssetQuery>,
) -> AppResult<CsvFile> {
    let csv = state.services.assets.export_csv(&claims, &query).await?;
    Ok(CsvFile::new("assets", csv))
}
