//! Asset (registered medical equipment) model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{enums::AssetStatus, sheet};

/// Asset record as stored in the `Assets` collection
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    #[serde(deserialize_with = "sheet::text")]
    pub id: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub name: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub brand: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub model: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub serial_number: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub department: String,
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(with = "sheet::decimal", default)]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(default)]
    pub status: AssetStatus,
    /// Date of the next scheduled preventive maintenance
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub next_pm_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub manual_url: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub google_drive_url: Option<String>,
    /// Image URL or inline data URI
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub image: Option<String>,
}

/// Create / replace asset request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    /// Leave blank to have an `EQ-NNNN` id generated
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Asset name is required"))]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    #[serde(default)]
    pub department: String,
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(with = "sheet::decimal", default)]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(default)]
    pub status: Option<AssetStatus>,
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub next_pm_date: Option<NaiveDate>,
    #[serde(default)]
    pub manual_url: Option<String>,
    #[serde(default)]
    pub google_drive_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AssetInput {
    /// Trim every text field so whitespace-only values fail validation
    pub fn normalized(self) -> Self {
        Self {
            id: non_blank(self.id),
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            model: self.model.trim().to_string(),
            serial_number: self.serial_number.trim().to_string(),
            department: self.department.trim().to_string(),
            manual_url: non_blank(self.manual_url),
            google_drive_url: non_blank(self.google_drive_url),
            image: non_blank(self.image),
            ..self
        }
    }

    pub fn into_asset(self, id: String) -> Asset {
        Asset {
            id,
            name: self.name,
            brand: self.brand,
            model: self.model,
            serial_number: self.serial_number,
            department: self.department,
            purchase_date: self.purchase_date,
            price: self.price,
            status: self.status.unwrap_or_default(),
            next_pm_date: self.next_pm_date,
            manual_url: self.manual_url,
            google_drive_url: self.google_drive_url,
            image: self.image,
        }
    }
}

/// Registry search filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    /// Case-insensitive match on name, id or serial number
    pub search: Option<String>,
    /// Department name, or `All`
    pub department: Option<String>,
}

impl AssetQuery {
    pub fn matches(&self, asset: &Asset) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                asset.name.to_lowercase().contains(&term)
                    || asset.id.to_lowercase().contains(&term)
                    || asset.serial_number.to_lowercase().contains(&term)
            }
            _ => true,
        };
        let matches_department = match self.department.as_deref() {
            None | Some("") | Some("All") => true,
            Some(department) => asset.department == department,
        };
        matches_search && matches_department
    }

    pub fn apply(&self, assets: Vec<Asset>) -> Vec<Asset> {
        assets.into_iter().filter(|a| self.matches(a)).collect()
    }
}
