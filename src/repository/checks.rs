//! Daily check methods on Repository

use super::{Collection, Repository};
use crate::{error::AppResult, models::CheckRecord};

impl Repository {
    pub async fn checks_list(&self) -> AppResult<Vec<CheckRecord>> {
        self.list_records(Collection::Checks).await
    }

    /// Append a check. Checks are never updated.
    pub async fn checks_create(&self, check: &CheckRecord) -> AppResult<()> {
        self.create_record(Collection::Checks, check).await
    }
}
