//! Ingestion payload validation.
//!
//! Endpoints submit reports over the wire with no schema guarantees, so the
//! payload mirror of [`Report`](crate::types::Report) has every field
//! optional. Validation enforces the required-field invariant and produces
//! a typed error instead of a deserialization panic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Antivirus, DiskEncryption, OsUpdate, Report, SleepSettings};

/// A report as submitted by an endpoint, before validation.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(default)]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disk_encryption: Option<DiskEncryption>,
    #[serde(default)]
    pub os_update: Option<OsUpdate>,
    #[serde(default)]
    pub antivirus: Option<Antivirus>,
    #[serde(default)]
    pub sleep_settings: Option<SleepSettings>,
}

/// A submitted payload failed the required-field invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Validate a submitted payload into a canonical [`Report`].
///
/// Required: `timestamp`, `diskEncryption`, `osUpdate`. The optional
/// `antivirus` and `sleepSettings` records pass through as-is; downstream
/// classification treats their absence as unknown, never as passing.
/// A missing `machineId` defaults to `"unknown"` rather than rejecting.
pub fn validate_payload(payload: ReportPayload) -> Result<Report, ValidationError> {
    let timestamp = payload
        .timestamp
        .ok_or(ValidationError::MissingField("timestamp"))?;
    let disk_encryption = payload
        .disk_encryption
        .ok_or(ValidationError::MissingField("diskEncryption"))?;
    let os_update = payload
        .os_update
        .ok_or(ValidationError::MissingField("osUpdate"))?;

    Ok(Report {
        machine_id: payload.machine_id.unwrap_or_else(|| "unknown".to_string()),
        timestamp,
        disk_encryption,
        os_update,
        antivirus: payload.antivirus,
        sleep_settings: payload.sleep_settings,
    })
}
