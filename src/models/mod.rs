//! Data models for MedEquip

pub mod asset;
pub mod audit;
pub mod backup;
pub mod check;
pub mod enums;
pub mod loan;
pub mod maintenance;
pub mod settings;
pub mod sheet;
pub mod stats;
pub mod user;

// Re-export commonly used types
pub use asset::Asset;
pub use check::CheckRecord;
pub use enums::{AssetStatus, AuditStatus, CheckStatus, LoanStatus, MaintenanceStatus, MaintenanceType, Role};
pub use loan::LoanRecord;
pub use maintenance::MaintenanceRecord;
pub use settings::AppSettings;
pub use user::{RegisteredUser, UserClaims};
