//! Sample records a fresh local install starts with

use serde_json::{json, Value};

use super::Collection;

pub fn sample_rows(collection: Collection) -> Vec<Value> {
    match collection {
        Collection::Assets => sample_assets(),
        Collection::Checks => sample_checks(),
        Collection::Maintenance => sample_maintenance(),
        Collection::Loans => sample_loans(),
    }
}

fn asset(
    id: &str,
    name: &str,
    brand: &str,
    model: &str,
    serial: &str,
    department: &str,
    purchased: &str,
    price: u32,
    status: &str,
    next_pm: &str,
    image_seed: u8,
) -> Value {
    json!({
        "id": id,
        "name": name,
        "brand": brand,
        "model": model,
        "serialNumber": serial,
        "department": department,
        "purchaseDate": purchased,
        "price": price,
        "status": status,
        "nextPmDate": next_pm,
        "image": format!("https://picsum.photos/200/200?random={}", image_seed),
    })
}

fn sample_assets() -> Vec<Value> {
    vec![
        asset("EQ-001", "Vital Sign Monitor", "Philips", "IntelliVue MX450", "PH-VSM-2023-001",
            "ER", "2023-01-15", 150_000, "Active", "2024-06-15", 1),
        asset("EQ-002", "Defibrillator", "Zoll", "R Series", "ZL-DEF-2022-889",
            "ICU", "2022-11-20", 350_000, "PM Due", "2024-05-20", 2),
        asset("EQ-003", "Infusion Pump", "B. Braun", "Infusomat Space", "BB-INF-9921",
            "Pediatrics", "2023-03-10", 45_000, "Loaned", "2024-09-10", 3),
        asset("EQ-004", "Portable X-Ray", "Fujifilm", "FDR Go", "FJ-XRAY-7721",
            "Radiology", "2021-06-01", 1_200_000, "Under Repair", "2024-06-01", 4),
        asset("EQ-005", "ECG Machine", "GE Healthcare", "MAC 2000", "GE-ECG-1102",
            "OPD", "2023-08-15", 85_000, "Active", "2024-08-15", 5),
    ]
}

fn sample_checks() -> Vec<Value> {
    vec![
        json!({"id": "CHK-001", "assetId": "EQ-001", "assetName": "Vital Sign Monitor",
            "date": "2024-05-25", "checkerName": "Nurse Joy", "type": "Daily", "status": "Pass"}),
        json!({"id": "CHK-002", "assetId": "EQ-002", "assetName": "Defibrillator",
            "date": "2024-05-25", "checkerName": "Dr. House", "type": "Daily", "status": "Fail",
            "notes": "Battery indicator low"}),
        json!({"id": "CHK-003", "assetId": "EQ-003", "assetName": "Infusion Pump",
            "date": "2024-05-24", "checkerName": "Nurse Joy", "type": "Daily", "status": "Pass"}),
    ]
}

fn sample_maintenance() -> Vec<Value> {
    vec![
        json!({"id": "MT-001", "assetId": "EQ-004", "assetName": "Portable X-Ray", "type": "CM",
            "requestDate": "2024-05-20", "technician": "Eng. Somchai", "cost": 5000,
            "description": "Arm movement stuck", "status": "In Progress"}),
        json!({"id": "MT-002", "assetId": "EQ-002", "assetName": "Defibrillator", "type": "PM",
            "requestDate": "2024-05-21", "technician": "Eng. Somchai", "cost": 2000,
            "description": "Annual calibration", "status": "Pending"}),
    ]
}

fn sample_loans() -> Vec<Value> {
    vec![json!({
        "id": "LN-001",
        "assetId": "EQ-003",
        "assetName": "Infusion Pump",
        "borrowerName": "ICU Ward",
        "department": "ICU",
        "loanDate": "2024-05-18",
        "dueDate": "2024-05-25",
        "status": "Active",
    })]
}
