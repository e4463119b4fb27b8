//! Field codecs shared by the record models.
//!
//! Records round-trip through the remote spreadsheet endpoint, which hands
//! blanks back as `""`, numbers as either JSON numbers or strings, and date
//! cells as full ISO timestamps. These codecs accept all of those shapes and
//! always write the canonical form.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{de, Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD`, also accepting a longer ISO timestamp. Timestamps
/// with an offset are instants and land on the server's local calendar day.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    parse_date_in(raw, &Local)
}

pub fn parse_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.len() > 10 {
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(instant.with_timezone(tz).date_naive());
        }
    }
    let head = trimmed.get(..10)?;
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

/// Plain text that may arrive as a number, bool or null
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Boolean that may arrive as `"TRUE"` / `"false"` strings
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean: {}", other))),
        },
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        Value::Null => Ok(false),
        other => Err(de::Error::custom(format!("invalid boolean: {}", other))),
    }
}

pub mod date {
    use super::*;

    pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = text(deserializer)?;
        parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {:?}", raw)))
    }
}

pub mod opt_date {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = text(deserializer)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        parse_date(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {:?}", raw)))
    }
}

/// Money amounts, written as JSON numbers so the spreadsheet can sum them
pub mod decimal {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.fract().is_zero() {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        serializer.serialize_f64(value.to_f64().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Decimal::ZERO),
            Value::Number(n) => Decimal::from_str(&n.to_string())
                .or_else(|_| Decimal::from_scientific(&n.to_string()))
                .map_err(de::Error::custom),
            Value::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
            Value::String(s) => Decimal::from_str(s.trim().replace(',', "").as_str())
                .map_err(|_| de::Error::custom(format!("invalid amount: {:?}", s))),
            other => Err(de::Error::custom(format!("invalid amount: {}", other))),
        }
    }
}
