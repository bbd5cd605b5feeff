//! CSV serialization for flattened report rows.

use csv::WriterBuilder;

use posturewatch_common::Report;

use crate::error::{EngineError, EngineResult};

use super::{flatten, CSV_HEADERS};

/// Render a report population as CSV, one row per report, headers first.
pub fn to_csv(reports: &[Report]) -> EngineResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for report in reports {
        let row = flatten(report);
        writer.write_record([
            row.timestamp.as_str(),
            row.platform.as_str(),
            row.disk_encryption.as_str(),
            row.os_update_status.as_str(),
            row.os_last_checked.as_str(),
            row.antivirus.as_str(),
            row.sleep_timeout.as_str(),
            row.compliance.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EngineError::serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| EngineError::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use posturewatch_common::{Antivirus, DiskEncryption, OsUpdate, SleepSettings};

    fn make_report(machine_id: &str, av: &str) -> Report {
        Report {
            machine_id: machine_id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, 30, 14, 30, 0).unwrap(),
            disk_encryption: DiskEncryption {
                encryption: "FileVault Enabled".to_string(),
                platform: "darwin".to_string(),
            },
            os_update: OsUpdate {
                update_status: "Up to Date".to_string(),
                last_checked: None,
                platform: "darwin".to_string(),
            },
            antivirus: Some(Antivirus {
                antivirus: av.to_string(),
                platform: "darwin".to_string(),
            }),
            sleep_settings: Some(SleepSettings {
                sleep_timeout_minutes: "10".to_string(),
                platform: "darwin".to_string(),
            }),
        }
    }

    #[test]
    fn test_csv_headers_first() {
        let csv = to_csv(&[]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Timestamp,System Platform,Disk Encryption Status,OS Update Status,\
             Last OS Check,Antivirus Status,Sleep Timeout (Minutes),Compliance Status"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_one_row_per_report() {
        let reports = vec![make_report("m-1", "Enabled"), make_report("m-2", "Disabled")];
        let csv = to_csv(&reports).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("Compliant"));
        assert!(lines[2].ends_with("Non-Compliant"));
        assert!(lines[1].contains("macOS"));
    }
}
