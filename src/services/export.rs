//! CSV exports
//!
//! UTF-8 with a byte order mark so spreadsheet tools pick up Thai text, one
//! header row, rows joined by `\n`. Which fields are quoted is fixed per export.

use rust_decimal::Decimal;

use crate::models::{
    audit::AuditEntry, sheet::DATE_FORMAT, Asset, MaintenanceRecord,
};

const BOM: char = '\u{FEFF}';

/// Double-quote a field, doubling embedded quotes. Line breaks become spaces
/// so every record stays on one line.
fn quoted(value: &str) -> String {
    let flat = value.replace("\r\n", " ").replace(['\r', '\n'], " ");
    format!("\"{}\"", flat.replace('"', "\"\""))
}

fn opt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
}

fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

fn document(header: &str, rows: impl Iterator<Item = String>) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(header);
    for row in rows {
        out.push('\n');
        out.push_str(&row);
    }
    out
}

pub fn assets_csv(assets: &[Asset]) -> String {
    document(
        "ID,Name,Brand,Model,Serial Number,Department,Purchase Date,Price,Status,Next PM",
        assets.iter().map(|a| {
            [
                quoted(&a.id),
                quoted(&a.name),
                quoted(&a.brand),
                quoted(&a.model),
                quoted(&a.serial_number),
                quoted(&a.department),
                quoted(&opt_date(a.purchase_date)),
                amount(a.price),
                quoted(a.status.as_str()),
                quoted(&opt_date(a.next_pm_date)),
            ]
            .join(",")
        }),
    )
}

pub fn audit_csv(entries: &[AuditEntry]) -> String {
    document(
        "ID,Name,Serial Number,Department,Audit Status",
        entries.iter().map(|e| {
            [
                quoted(&e.asset.id),
                quoted(&e.asset.name),
                quoted(&e.asset.serial_number),
                quoted(&e.asset.department),
                quoted(e.audit_status.label()),
            ]
            .join(",")
        }),
    )
}

/// Maintenance log export
pub fn maintenance_csv(records: &[MaintenanceRecord]) -> String {
    document(
        "ID,Date,Asset,Type,Description,Status,Cost",
        records.iter().map(|r| {
            [
                quoted(&r.id),
                quoted(&r.request_date.format(DATE_FORMAT).to_string()),
                quoted(&r.asset_name),
                quoted(&r.maintenance_type.to_string()),
                quoted(&r.description),
                quoted(&r.status.to_string()),
                amount(r.cost),
            ]
            .join(",")
        }),
    )
}

/// Compliance report export: asset name, description and technician are quoted
pub fn compliance_csv(records: &[MaintenanceRecord]) -> String {
    document(
        "ID,Date,Asset Name,Type,Description,Technician,Status",
        records.iter().map(|r| {
            [
                r.id.clone(),
                r.request_date.format(DATE_FORMAT).to_string(),
                quoted(&r.asset_name),
                r.maintenance_type.to_string(),
                quoted(&r.description),
                quoted(&r.technician),
                r.status.to_string(),
            ]
            .join(",")
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        asset::AssetInput, AuditStatus, MaintenanceStatus, MaintenanceType,
    };
    use chrono::NaiveDate;

    fn asset(id: &str, name: &str) -> Asset {
        AssetInput {
            name: name.into(),
            serial_number: format!("SN-{}", id),
            department: "ER".into(),
            price: Decimal::new(150000, 0),
            next_pm_date: NaiveDate::from_ymd_opt(2024, 6, 15),
            ..Default::default()
        }
        .into_asset(id.into())
    }

    fn record(id: &str) -> MaintenanceRecord {
        MaintenanceRecord {
            id: id.into(),
            asset_id: "EQ-004".into(),
            asset_name: "Portable X-Ray".into(),
            maintenance_type: MaintenanceType::CM,
            request_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            technician: "Eng. Somchai".into(),
            description: "Arm \"movement\" stuck".into(),
            cost: Decimal::new(500050, 2),
            attachment_url: None,
            status: MaintenanceStatus::InProgress,
        }
    }

    #[test]
    fn n_records_give_n_plus_one_lines() {
        let assets: Vec<Asset> = (1..=4).map(|i| asset(&format!("EQ-{}", i), "Monitor")).collect();
        let csv = assets_csv(&assets);
        assert!(csv.starts_with('\u{FEFF}'));
        assert_eq!(csv.lines().count(), 5);

        let empty = assets_csv(&[]);
        assert_eq!(empty.lines().count(), 1);
    }

    #[test]
    fn asset_row_quotes_all_but_price() {
        let csv = assets_csv(&[asset("EQ-001", "Vital Sign Monitor")]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "\"EQ-001\",\"Vital Sign Monitor\",\"\",\"\",\"SN-EQ-001\",\"ER\",\"\",150000,\"Active\",\"2024-06-15\""
        );
    }

    #[test]
    fn maintenance_and_compliance_rows() {
        let records = [record("MT-001")];
        let log = maintenance_csv(&records);
        assert_eq!(
            log.lines().nth(1).unwrap(),
            "\"MT-001\",\"2024-05-20\",\"Portable X-Ray\",\"CM\",\"Arm \"\"movement\"\" stuck\",\"In Progress\",5000.5"
        );

        let report = compliance_csv(&records);
        assert_eq!(
            report.lines().nth(1).unwrap(),
            "MT-001,2024-05-20,\"Portable X-Ray\",CM,\"Arm \"\"movement\"\" stuck\",\"Eng. Somchai\",In Progress"
        );
    }

    #[test]
    fn free_text_cannot_break_rows() {
        let mut multi_line = record("MT-002");
        multi_line.description = "Arm stuck\r\nmotor noise\nretest".into();
        multi_line.technician = "Somchai, Eng.".into();
        let records = [record("MT-001"), multi_line];

        let report = compliance_csv(&records);
        assert_eq!(report.lines().count(), 3);
        assert_eq!(
            report.lines().nth(2).unwrap(),
            "MT-002,2024-05-20,\"Portable X-Ray\",CM,\"Arm stuck motor noise retest\",\"Somchai, Eng.\",In Progress"
        );
        assert_eq!(maintenance_csv(&records).lines().count(), 3);
    }

    #[test]
    fn audit_rows_use_labels() {
        let entries = vec![
            AuditEntry { asset: asset("EQ-1", "A"), audit_status: AuditStatus::Found },
            AuditEntry { asset: asset("EQ-2", "B"), audit_status: AuditStatus::Unchecked },
        ];
        let csv = audit_csv(&entries);
        assert!(csv.lines().nth(1).unwrap().ends_with("\"Found\""));
        assert!(csv.lines().nth(2).unwrap().ends_with("\"Not Checked\""));
    }
}
