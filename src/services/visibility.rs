//! Department scoping
//!
//! Staff accounts with a department only see that department's assets, and
//! only the checks, maintenance records and loans that reference them.

use std::collections::HashSet;

use crate::models::{Asset, UserClaims};

/// Assets the caller may see
pub fn visible_assets(claims: &UserClaims, assets: Vec<Asset>) -> Vec<Asset> {
    match claims.scoped_department() {
        None => assets,
        Some(department) => assets.into_iter().filter(|a| a.department == department).collect(),
    }
}

pub fn can_see(claims: &UserClaims, asset: &Asset) -> bool {
    claims
        .scoped_department()
        .map_or(true, |department| asset.department == department)
}

/// Keep the records whose asset is visible to the caller. `assets` is the
/// full asset list.
pub fn visible_records<T>(
    claims: &UserClaims,
    assets: &[Asset],
    records: Vec<T>,
    asset_id: impl Fn(&T) -> &str,
) -> Vec<T> {
    let Some(department) = claims.scoped_department() else {
        return records;
    };
    let allowed: HashSet<&str> = assets
        .iter()
        .filter(|a| a.department == department)
        .map(|a| a.id.as_str())
        .collect();
    records
        .into_iter()
        .filter(|r| allowed.contains(asset_id(r)))
        .collect()
}
