//! Daily inspection check model

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::{IntoParams, ToSchema};

use super::{enums::CheckStatus, sheet};

/// The four inspection items, each with a note describing what was wrong
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistDetails {
    #[serde(deserialize_with = "sheet::flag")]
    pub power_cord: bool,
    #[serde(deserialize_with = "sheet::text", default)]
    pub power_cord_note: String,
    #[serde(deserialize_with = "sheet::flag")]
    pub screen: bool,
    #[serde(deserialize_with = "sheet::text", default)]
    pub screen_note: String,
    #[serde(deserialize_with = "sheet::flag")]
    pub functionality: bool,
    #[serde(deserialize_with = "sheet::text", default)]
    pub functionality_note: String,
    #[serde(deserialize_with = "sheet::flag")]
    pub cleanliness: bool,
    #[serde(deserialize_with = "sheet::text", default)]
    pub cleanliness_note: String,
}

/// One checklist item, used to enumerate results and failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem<'a> {
    /// Label shown in notifications
    pub label: &'static str,
    pub ok: bool,
    pub note: &'a str,
}

impl ChecklistDetails {
    pub fn all_ok() -> Self {
        Self {
            power_cord: true,
            power_cord_note: String::new(),
            screen: true,
            screen_note: String::new(),
            functionality: true,
            functionality_note: String::new(),
            cleanliness: true,
            cleanliness_note: String::new(),
        }
    }

    pub fn items(&self) -> [ChecklistItem<'_>; 4] {
        [
            ChecklistItem { label: "สายไฟ", ok: self.power_cord, note: &self.power_cord_note },
            ChecklistItem { label: "หน้าจอ", ok: self.screen, note: &self.screen_note },
            ChecklistItem { label: "การทำงาน", ok: self.functionality, note: &self.functionality_note },
            ChecklistItem { label: "ความสะอาด", ok: self.cleanliness, note: &self.cleanliness_note },
        ]
    }

    /// Pass only when every item is fine
    pub fn overall_status(&self) -> CheckStatus {
        if self.items().iter().all(|item| item.ok) {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        }
    }

    /// First failed item that has no note, if any
    pub fn missing_note(&self) -> Option<&'static str> {
        self.items()
            .iter()
            .find(|item| !item.ok && item.note.trim().is_empty())
            .map(|item| item.label)
    }
}

/// Nested details may come back from the spreadsheet as a JSON string
fn checklist_cell<'de, D>(deserializer: D) -> Result<Option<ChecklistDetails>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => serde_json::from_value(Value::Object(map)).ok(),
        Value::String(s) if !s.trim().is_empty() => serde_json::from_str(&s).ok(),
        _ => None,
    })
}

/// Check record as stored in the `Checks` collection (append-only)
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckRecord {
    #[serde(deserialize_with = "sheet::text")]
    pub id: String,
    #[serde(deserialize_with = "sheet::text", default)]
    pub asset_id: String,
    /// Asset name at the time of the check
    #[serde(deserialize_with = "sheet::text", default)]
    pub asset_name: String,
    #[serde(with = "sheet::date")]
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    #[serde(deserialize_with = "sheet::text", default)]
    pub checker_name: String,
    /// Always `Daily`
    #[serde(rename = "type", deserialize_with = "sheet::text", default)]
    pub check_type: String,
    pub status: CheckStatus,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(deserialize_with = "checklist_cell", default, skip_serializing_if = "Option::is_none")]
    pub checklist_details: Option<ChecklistDetails>,
}

/// Daily check submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheck {
    pub asset_id: String,
    #[serde(default)]
    pub checker_name: String,
    pub checklist: ChecklistDetails,
    /// Overall notes, kept only when the check fails
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to today
    #[serde(with = "sheet::opt_date", default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CheckQuery {
    /// Only checks made on this day (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
}

/// Result of sending the daily summary
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub department: String,
    pub checker: String,
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    pub total: usize,
    pub fail_count: usize,
    pub failed_items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryRequest {
    /// Name of the person sending the summary, defaults to the logged-in user
    pub checker_name: Option<String>,
}
