//! Full data backup and restore

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::backup::BackupDocument};

use super::AuthenticatedUser;

#[derive(Serialize, ToSchema)]
pub struct ImportResponse {
    /// Collections that were replaced
    pub restored: Vec<String>,
}

/// Download every collection as one JSON document (admin only)
#[utoipa::path(
    get,
    path = "/backup",
    tag = "backup",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Backup document", body = BackupDocument),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse)
    )
)]
pub async fn export_backup(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<BackupDocument>> {
    claims.require_admin()?;
    let document = state.services.backup.export().await?;
    Ok(Json(document))
}

/// Restore collections from a backup document (admin only)
#[utoipa::path(
    post,
    path = "/backup",
    tag = "backup",
    security(("bearer_auth" = [])),
    request_body = BackupDocument,
    responses(
        (status = 200, description = "Collections restored", body = ImportResponse),
        (status = 403, description = "Administrator privileges required", body = crate::error::ErrorResponse),
        (status = 422, description = "Import is not possible in remote mode", body = crate::error::ErrorResponse)
    )
)]
pub async fn import_backup(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(document): Json<BackupDocument>,
) -> AppResult<Json<ImportResponse>> {
    claims.require_admin()?;
    let restored = state.services.backup.import(document).await?;
    tracing::info!("Backup restored by {}: {:?}", claims.sub, restored);
    Ok(Json(ImportResponse { restored }))
}
