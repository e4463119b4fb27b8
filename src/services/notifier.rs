//! Telegram notifications for domain events
//!
//! Delivery is best effort: a missing bot token or chat id skips the message,
//! and HTTP failures are logged and dropped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::{
    config::NotificationConfig,
    error::{AppError, AppResult},
    repository::SettingsStore,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send an HTML-formatted message. Never fails.
    async fn notify(&self, text: &str);
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

/// Bot API client. Token and chat id are read from the current settings on
/// every message.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    settings: SettingsStore,
}

impl TelegramNotifier {
    pub fn new(config: &NotificationConfig, settings: SettingsStore) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            settings,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) {
        let settings = self.settings.get().await;
        if !settings.telegram_configured() {
            tracing::warn!("Telegram notification skipped: bot token or chat id not configured");
            return;
        }

        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base,
            settings.telegram_bot_token.trim()
        );
        let body = SendMessage {
            chat_id: settings.telegram_chat_id.trim(),
            text,
            parse_mode: "HTML",
        };

        match self.client.post(url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Telegram notification delivered");
            }
            Ok(response) => {
                tracing::warn!("Telegram API answered {}", response.status());
            }
            Err(e) => {
                tracing::error!("Telegram notification failed: {}", e);
            }
        }
    }
}

/// Message templates
pub mod messages {
    use chrono::NaiveDate;

    use crate::models::{check::DailySummary, Asset, CheckRecord, MaintenanceRecord};

    /// Escape text for Telegram's HTML parse mode
    pub fn escape(text: &str) -> String {
        text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
    }

    fn or_dash(text: Option<&str>) -> String {
        match text.map(str::trim) {
            Some(t) if !t.is_empty() => escape(t),
            _ => "-".to_string(),
        }
    }

    pub fn check_failed(check: &CheckRecord) -> String {
        let issues: String = check
            .checklist_details
            .iter()
            .flat_map(|details| details.items())
            .filter(|item| !item.ok)
            .map(|item| {
                let note = if item.note.trim().is_empty() { "ผิดปกติ" } else { item.note };
                format!("- {}: {}\n", item.label, escape(note))
            })
            .collect();
        let issues = if issues.is_empty() { "- ไม่ระบุ".to_string() } else { issues };

        format!(
            "🚨 <b>แจ้งเตือนความผิดปกติ (Daily Check Fail)</b>\n\n\
             <b>อุปกรณ์:</b> {}\n\
             <b>ผู้ตรวจ:</b> {}\n\
             <b>วันที่:</b> {}\n\
             ----------------------------\n\
             <b>จุดที่พบปัญหา:</b>\n{}\n\
             <b>สรุปเพิ่มเติม:</b> {}",
            escape(&check.asset_name),
            escape(&check.checker_name),
            check.date.format("%Y-%m-%d"),
            issues,
            or_dash(check.notes.as_deref()),
        )
    }

    pub fn repair_requested(record: &MaintenanceRecord) -> String {
        format!(
            "🛠 <b>แจ้งซ่อมใหม่ (New Maintenance Request)</b>\n\n\
             <b>อุปกรณ์:</b> {}\n\
             <b>ผู้แจ้ง:</b> {}\n\
             <b>อาการเสีย:</b> {}\n\
             <b>เอกสารแนบ:</b> {}\n\
             <b>ความเร่งด่วน:</b> สูง",
            escape(&record.asset_name),
            escape(&record.technician),
            escape(&record.description),
            if record.attachment_url.is_some() { "มีไฟล์แนบ" } else { "-" },
        )
    }

    pub fn upcoming_pm(asset: &Asset, due: NaiveDate, days_left: i64) -> String {
        format!(
            "📅 <b>แจ้งเตือน PM ล่วงหน้า (Upcoming PM)</b>\n\n\
             <b>อุปกรณ์:</b> {} ({})\n\
             <b>แผนก:</b> {}\n\
             <b>กำหนด PM:</b> {} (อีก {} วัน)\n\
             กรุณาเตรียมแผนการบำรุงรักษา",
            escape(&asset.name),
            escape(&asset.id),
            escape(&asset.department),
            due.format("%Y-%m-%d"),
            days_left,
        )
    }

    pub fn daily_summary(summary: &DailySummary) -> String {
        let tail = if summary.failed_items.is_empty() {
            "\n✨ อุปกรณ์สมบูรณ์ทุกรายการ".to_string()
        } else {
            let names: Vec<String> = summary.failed_items.iter().map(|n| escape(n)).collect();
            format!("\n<b>รายชื่อเครื่องที่พบปัญหา:</b>\n- {}", names.join("\n- "))
        };

        format!(
            "📊 <b>สรุปผลการตรวจประจำวัน ({})</b>\n\n\
             <b>วันที่:</b> {}\n\
             <b>ผู้ตรวจ:</b> {}\n\
             --------------------------------\n\
             ✅ <b>ตรวจสอบแล้ว:</b> {} เครื่อง\n\
             ❌ <b>พบปัญหา (ไม่ผ่าน):</b> {} เครื่อง\n{}",
            escape(&summary.department),
            summary.date.format("%Y-%m-%d"),
            escape(&summary.checker),
            summary.total,
            summary.fail_count,
            tail,
        )
    }
}
