//! Application settings (singleton, persisted locally)

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_HOSPITAL_NAME: &str = "โรงพยาบาลแก้งคร้อ จ.ชัยภูมิ";
/// Placeholder name left behind by older installs
const LEGACY_HOSPITAL_NAME: &str = "MedEquip Manager";
pub const DEFAULT_DEPARTMENTS: [&str; 6] =
    ["ER", "ICU", "OPD", "Radiology", "Pediatrics", "เวชกรรมฟื้นฟู"];

fn default_departments() -> IndexSet<String> {
    DEFAULT_DEPARTMENTS.iter().map(|d| d.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub hospital_name: String,
    /// Image URL or data URI
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub background_url: String,
    #[serde(default)]
    pub telegram_bot_token: String,
    #[serde(default)]
    pub telegram_chat_id: String,
    /// Remote spreadsheet endpoint. Remote storage is used when this is a valid https URL.
    #[serde(default)]
    pub google_script_url: String,
    #[serde(default = "default_departments")]
    #[schema(value_type = Vec<String>)]
    pub departments: IndexSet<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hospital_name: DEFAULT_HOSPITAL_NAME.to_string(),
            logo_url: String::new(),
            background_url: String::new(),
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
            google_script_url: String::new(),
            departments: default_departments(),
        }
    }
}

impl AppSettings {
    /// Fill in the fields older or hand-edited blobs leave empty
    pub fn with_fallbacks(mut self) -> Self {
        if self.hospital_name.trim().is_empty() || self.hospital_name == LEGACY_HOSPITAL_NAME {
            self.hospital_name = DEFAULT_HOSPITAL_NAME.to_string();
        }
        if self.departments.is_empty() {
            self.departments = default_departments();
        }
        self
    }

    /// Remote endpoint, when one is configured and well formed
    pub fn remote_endpoint(&self) -> Option<reqwest::Url> {
        let raw = self.google_script_url.trim();
        if raw.is_empty() {
            return None;
        }
        reqwest::Url::parse(raw)
            .ok()
            .filter(|url| url.scheme() == "https" && url.host_str().is_some())
    }

    /// Append a department if it is not already listed. Returns true if added.
    pub fn add_department(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.departments.insert(name.to_string())
    }

    pub fn remove_department(&mut self, name: &str) -> bool {
        self.departments.shift_remove(name.trim())
    }

    pub fn telegram_configured(&self) -> bool {
        !self.telegram_bot_token.trim().is_empty() && !self.telegram_chat_id.trim().is_empty()
    }

    pub fn public_view(&self) -> PublicSettings {
        PublicSettings {
            hospital_name: self.hospital_name.clone(),
            logo_url: self.logo_url.clone(),
            background_url: self.background_url.clone(),
            departments: self.departments.iter().cloned().collect(),
        }
    }
}

/// Branding and department list, readable before login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicSettings {
    pub hospital_name: String,
    pub logo_url: String,
    pub background_url: String,
    pub departments: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DepartmentRequest {
    pub name: String,
}
