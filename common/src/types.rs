use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The normalized endpoint platform, derived from free-text platform tags.
///
/// Collectors report platform tags in whatever form their runtime exposes
/// (`win32`, `windows_nt`, `darwin`, ...). All classification and filtering
/// code consumes this enumeration, never the raw strings.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unknown,
}

impl Platform {
    /// Resolve a free-text platform tag, case-insensitively.
    ///
    /// Recognized aliases: `win32`/`windows`/`windows_nt`, `darwin`/`macos`,
    /// `linux`. Anything else resolves to `Unknown`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "win32" | "windows" | "windows_nt" => Platform::Windows,
            "darwin" | "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            _ => Platform::Unknown,
        }
    }

    /// Display name for exports and annotations.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
            Platform::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four monitored security controls.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Encryption,
    Updates,
    Antivirus,
    Sleep,
}

impl Control {
    /// All controls, in reporting order.
    pub const ALL: [Control; 4] = [
        Control::Encryption,
        Control::Updates,
        Control::Antivirus,
        Control::Sleep,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Control::Encryption => "Disk Encryption",
            Control::Updates => "OS Updates",
            Control::Antivirus => "Antivirus",
            Control::Sleep => "Sleep Settings",
        }
    }
}

/// Disk encryption signal from an endpoint collector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DiskEncryption {
    /// Free-text status string (e.g. "BitLocker Enabled", "Not Encrypted").
    #[serde(default)]
    pub encryption: String,
    /// Free-text platform tag from the collecting sub-agent.
    #[serde(default)]
    pub platform: String,
}

/// OS update signal from an endpoint collector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OsUpdate {
    /// Free-text status string (e.g. "Up to Date", "Outdated").
    #[serde(default)]
    pub update_status: String,
    /// When the endpoint last checked for updates, if ever.
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
    /// Free-text platform tag from the collecting sub-agent.
    #[serde(default)]
    pub platform: String,
}

/// Antivirus signal from an endpoint collector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Antivirus {
    /// Free-text status string; the literal `"Enabled"` is the passing value.
    #[serde(default)]
    pub antivirus: String,
    /// Free-text platform tag from the collecting sub-agent.
    #[serde(default)]
    pub platform: String,
}

/// Sleep/lock timeout signal from an endpoint collector.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SleepSettings {
    /// Free-text numeric string, in minutes.
    #[serde(default)]
    pub sleep_timeout_minutes: String,
    /// Free-text platform tag from the collecting sub-agent.
    #[serde(default)]
    pub platform: String,
}

/// One point-in-time security-posture observation from an endpoint.
///
/// Immutable once stored: created by ingestion, never mutated, retained
/// indefinitely. `antivirus` and `sleep_settings` may be absent and are
/// treated as unknown (failing the dependent controls), never as passing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Opaque identifier of the reporting endpoint. Stable per device,
    /// not unique per report.
    pub machine_id: String,
    /// When the observation was taken.
    pub timestamp: DateTime<Utc>,
    pub disk_encryption: DiskEncryption,
    pub os_update: OsUpdate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antivirus: Option<Antivirus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_settings: Option<SleepSettings>,
}

impl Report {
    /// The single platform for this report.
    ///
    /// Sub-records are collected by different sub-agents and may carry
    /// differing tags. Priority: `disk_encryption.platform`, else
    /// `os_update.platform`, else `antivirus.platform`, else `Unknown`.
    /// Only an absent or empty tag defers to the next sub-record; a present
    /// but unrecognized tag resolves to `Unknown` without falling through.
    pub fn platform(&self) -> Platform {
        let tags = [
            Some(self.disk_encryption.platform.as_str()),
            Some(self.os_update.platform.as_str()),
            self.antivirus.as_ref().map(|av| av.platform.as_str()),
        ];
        for tag in tags.into_iter().flatten() {
            if !tag.trim().is_empty() {
                return Platform::from_tag(tag);
            }
        }
        Platform::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_report(disk_tag: &str, os_tag: &str, av_tag: Option<&str>) -> Report {
        Report {
            machine_id: "machine-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap(),
            disk_encryption: DiskEncryption {
                encryption: "BitLocker Enabled".to_string(),
                platform: disk_tag.to_string(),
            },
            os_update: OsUpdate {
                update_status: "Up to Date".to_string(),
                last_checked: None,
                platform: os_tag.to_string(),
            },
            antivirus: av_tag.map(|tag| Antivirus {
                antivirus: "Enabled".to_string(),
                platform: tag.to_string(),
            }),
            sleep_settings: None,
        }
    }

    #[test]
    fn test_platform_aliases() {
        assert_eq!(Platform::from_tag("win32"), Platform::Windows);
        assert_eq!(Platform::from_tag("WINDOWS_NT"), Platform::Windows);
        assert_eq!(Platform::from_tag("windows"), Platform::Windows);
        assert_eq!(Platform::from_tag("darwin"), Platform::MacOs);
        assert_eq!(Platform::from_tag("macOS"), Platform::MacOs);
        assert_eq!(Platform::from_tag("Linux"), Platform::Linux);
        assert_eq!(Platform::from_tag("freebsd"), Platform::Unknown);
        assert_eq!(Platform::from_tag(""), Platform::Unknown);
    }

    #[test]
    fn test_platform_tag_trimmed() {
        assert_eq!(Platform::from_tag("  win32  "), Platform::Windows);
    }

    #[test]
    fn test_report_platform_prefers_disk_encryption_tag() {
        let report = make_report("darwin", "win32", Some("linux"));
        assert_eq!(report.platform(), Platform::MacOs);
    }

    #[test]
    fn test_report_platform_falls_through_empty_tags() {
        let report = make_report("", "linux", None);
        assert_eq!(report.platform(), Platform::Linux);

        let report = make_report("", "", Some("darwin"));
        assert_eq!(report.platform(), Platform::MacOs);

        let report = make_report("", "", None);
        assert_eq!(report.platform(), Platform::Unknown);
    }

    #[test]
    fn test_report_platform_unrecognized_tag_does_not_fall_through() {
        // A present but unrecognized tag wins the priority chain as Unknown.
        let report = make_report("beos", "linux", None);
        assert_eq!(report.platform(), Platform::Unknown);
    }

    #[test]
    fn test_report_wire_field_names() {
        let report = make_report("win32", "win32", Some("win32"));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("machineId").is_some());
        assert!(json.get("diskEncryption").is_some());
        assert!(json.get("osUpdate").is_some());
        assert!(json["osUpdate"].get("updateStatus").is_some());
    }

    #[test]
    fn test_report_round_trip_without_optional_records() {
        let report = make_report("linux", "linux", None);
        let json = serde_json::to_string(&report).unwrap();
        let decoded: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, report);
        assert!(decoded.antivirus.is_none());
    }
}
