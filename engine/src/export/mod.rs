//! Report export: flattened rows with canonical compliance labels.

pub mod csv_export;

use chrono::{DateTime, Utc};

use posturewatch_common::Report;

use crate::policy::classify;

/// Export column headers, in output order.
pub const CSV_HEADERS: [&str; 8] = [
    "Timestamp",
    "System Platform",
    "Disk Encryption Status",
    "OS Update Status",
    "Last OS Check",
    "Antivirus Status",
    "Sleep Timeout (Minutes)",
    "Compliance Status",
];

/// One flattened export row, all fields rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub timestamp: String,
    pub platform: String,
    pub disk_encryption: String,
    pub os_update_status: String,
    pub os_last_checked: String,
    pub antivirus: String,
    pub sleep_timeout: String,
    pub compliance: String,
}

/// Flatten one report into an export row.
///
/// The compliance label comes from the canonical classify/evaluate policy,
/// never from a separate string match over the raw fields.
pub fn flatten(report: &Report) -> ExportRow {
    let verdict = classify(report);

    ExportRow {
        timestamp: format_timestamp(&report.timestamp),
        platform: report.platform().name().to_string(),
        disk_encryption: non_empty_or(&report.disk_encryption.encryption, "Not Available"),
        os_update_status: non_empty_or(&report.os_update.update_status, "Not Available"),
        os_last_checked: report
            .os_update
            .last_checked
            .map(|t| format_timestamp(&t))
            .unwrap_or_else(|| "Never".to_string()),
        antivirus: report
            .antivirus
            .as_ref()
            .map(|av| non_empty_or(&av.antivirus, "Not Available"))
            .unwrap_or_else(|| "Not Available".to_string()),
        sleep_timeout: report
            .sleep_settings
            .as_ref()
            .map(|s| non_empty_or(&s.sleep_timeout_minutes, "Not Set"))
            .unwrap_or_else(|| "Not Set".to_string()),
        compliance: verdict.status().label().to_string(),
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
