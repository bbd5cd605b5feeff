//! Fleet-wide compliance statistics.
//!
//! Two independent computations over a bounded working set of the most
//! recent reports: snapshot compliant/non-compliant proportions, and a
//! calendar-day trend of per-control pass rates. The anchor date is
//! injected so the aggregator is deterministic under test.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use posturewatch_common::Report;

use crate::policy::classify;

/// Aggregation tunables. Defaults match the production dashboards.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// How many of the most recent reports feed the statistics.
    pub window_size: usize,
    /// How many calendar days the trend covers, anchor day included.
    pub trend_days: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            trend_days: 7,
        }
    }
}

/// One slice of the snapshot proportions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PiePoint {
    pub name: String,
    pub value: f64,
}

/// Per-control pass rates for one calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Calendar date, `%Y-%m-%d`.
    pub date: String,
    pub encryption: f64,
    pub antivirus: f64,
    pub updates: f64,
    pub sleep: f64,
}

/// Snapshot proportions plus the calendar-day trend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStats {
    /// `[Compliant, Non-Compliant]` percentages over the window.
    pub pie_data: Vec<PiePoint>,
    /// Exactly `trend_days` buckets, ascending by date, zero-filled for
    /// days without reports.
    pub line_data: Vec<TrendPoint>,
}

#[derive(Default, Clone, Copy)]
struct BucketCounts {
    total: usize,
    encryption: usize,
    antivirus: usize,
    updates: usize,
    sleep: usize,
}

/// Compute fleet statistics over a window of reports.
///
/// `reports_desc` must be sorted by timestamp descending; the window is its
/// first `window_size` entries. `today` anchors the trend: buckets cover
/// the `trend_days` calendar days ending at the anchor, inclusive, using
/// UTC calendar dates. An empty window yields zero percentages, never NaN.
pub fn compliance_stats(
    reports_desc: &[Report],
    today: NaiveDate,
    config: &StatsConfig,
) -> ComplianceStats {
    let window = &reports_desc[..reports_desc.len().min(config.window_size)];

    ComplianceStats {
        pie_data: snapshot_proportions(window),
        line_data: trend(window, today, config.trend_days),
    }
}

fn snapshot_proportions(window: &[Report]) -> Vec<PiePoint> {
    let total = window.len();
    let compliant = window
        .iter()
        .filter(|r| classify(r).is_compliant())
        .count();

    vec![
        PiePoint {
            name: "Compliant".to_string(),
            value: rate(compliant, total),
        },
        PiePoint {
            name: "Non-Compliant".to_string(),
            value: rate(total - compliant, total),
        },
    ]
}

fn trend(window: &[Report], today: NaiveDate, trend_days: usize) -> Vec<TrendPoint> {
    let days = trend_days.max(1);
    let start = today - Duration::days(days as i64 - 1);

    let mut counts = vec![BucketCounts::default(); days];
    for report in window {
        let date = report.timestamp.date_naive();
        let offset = (date - start).num_days();
        if offset < 0 || offset >= days as i64 {
            continue;
        }
        let bucket = &mut counts[offset as usize];
        let verdict = classify(report);
        bucket.total += 1;
        bucket.encryption += usize::from(verdict.encrypted);
        bucket.antivirus += usize::from(verdict.av_active);
        bucket.updates += usize::from(verdict.updated);
        bucket.sleep += usize::from(verdict.sleep_ok);
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let date = start + Duration::days(i as i64);
            TrendPoint {
                date: date.format("%Y-%m-%d").to_string(),
                encryption: rate(bucket.encryption, bucket.total),
                antivirus: rate(bucket.antivirus, bucket.total),
                updates: rate(bucket.updates, bucket.total),
                sleep: rate(bucket.sleep, bucket.total),
            }
        })
        .collect()
}

fn rate(passes: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        passes as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use posturewatch_common::{Antivirus, DiskEncryption, OsUpdate, Report, SleepSettings};

    fn make_report(day: u32, av: &str, sleep_minutes: &str) -> Report {
        Report {
            machine_id: "machine-1".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 8, day, 12, 0, 0).unwrap(),
            disk_encryption: DiskEncryption {
                encryption: "BitLocker Enabled".to_string(),
                platform: "win32".to_string(),
            },
            os_update: OsUpdate {
                update_status: "Up to Date".to_string(),
                last_checked: None,
                platform: "win32".to_string(),
            },
            antivirus: Some(Antivirus {
                antivirus: av.to_string(),
                platform: "win32".to_string(),
            }),
            sleep_settings: Some(SleepSettings {
                sleep_timeout_minutes: sleep_minutes.to_string(),
                platform: "win32".to_string(),
            }),
        }
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 30).unwrap()
    }

    #[test]
    fn test_empty_population_yields_zeroes_not_nan() {
        let stats = compliance_stats(&[], anchor(), &StatsConfig::default());
        assert_eq!(stats.pie_data[0].value, 0.0);
        assert_eq!(stats.pie_data[1].value, 0.0);
        assert!(stats.pie_data.iter().all(|p| !p.value.is_nan()));
    }

    #[test]
    fn test_trend_always_has_seven_ascending_buckets() {
        let stats = compliance_stats(&[], anchor(), &StatsConfig::default());
        assert_eq!(stats.line_data.len(), 7);
        assert_eq!(stats.line_data[0].date, "2026-08-24");
        assert_eq!(stats.line_data[6].date, "2026-08-30");
        let mut dates: Vec<&str> = stats.line_data.iter().map(|p| p.date.as_str()).collect();
        let sorted = dates.clone();
        dates.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_snapshot_proportions() {
        let reports = vec![
            make_report(30, "Enabled", "15"),
            make_report(30, "Enabled", "15"),
            make_report(30, "Disabled", "15"),
            make_report(30, "Enabled", "120"),
        ];
        let stats = compliance_stats(&reports, anchor(), &StatsConfig::default());
        assert_eq!(stats.pie_data[0].name, "Compliant");
        assert_eq!(stats.pie_data[0].value, 50.0);
        assert_eq!(stats.pie_data[1].name, "Non-Compliant");
        assert_eq!(stats.pie_data[1].value, 50.0);
    }

    #[test]
    fn test_trend_rates_are_per_control_not_overall() {
        // Both reports fail sleep, one also fails antivirus. Encryption and
        // updates pass for both, so their rates stay at 100 even though no
        // report is compliant overall.
        let reports = vec![
            make_report(30, "Enabled", "999"),
            make_report(30, "Disabled", "999"),
        ];
        let stats = compliance_stats(&reports, anchor(), &StatsConfig::default());
        let today_bucket = stats.line_data.last().unwrap();
        assert_eq!(today_bucket.encryption, 100.0);
        assert_eq!(today_bucket.updates, 100.0);
        assert_eq!(today_bucket.antivirus, 50.0);
        assert_eq!(today_bucket.sleep, 0.0);
        assert_eq!(stats.pie_data[0].value, 0.0);
    }

    #[test]
    fn test_trend_buckets_by_calendar_day() {
        let reports = vec![
            make_report(30, "Enabled", "15"),
            make_report(28, "Disabled", "15"),
            // Outside the 7-day range: ignored.
            make_report(20, "Enabled", "15"),
        ];
        let stats = compliance_stats(&reports, anchor(), &StatsConfig::default());
        let by_date: Vec<(&str, f64)> = stats
            .line_data
            .iter()
            .map(|p| (p.date.as_str(), p.antivirus))
            .collect();
        assert!(by_date.contains(&("2026-08-30", 100.0)));
        assert!(by_date.contains(&("2026-08-28", 0.0)));
        assert!(by_date.contains(&("2026-08-24", 0.0)));
    }

    #[test]
    fn test_window_size_bounds_the_working_set() {
        // Two old non-compliant reports beyond a window of 2 recent
        // compliant ones must not affect the snapshot.
        let reports = vec![
            make_report(30, "Enabled", "15"),
            make_report(30, "Enabled", "15"),
            make_report(29, "Disabled", "15"),
            make_report(29, "Disabled", "15"),
        ];
        let config = StatsConfig {
            window_size: 2,
            trend_days: 7,
        };
        let stats = compliance_stats(&reports, anchor(), &config);
        assert_eq!(stats.pie_data[0].value, 100.0);
    }

    #[test]
    fn test_trend_days_configurable() {
        let config = StatsConfig {
            window_size: 100,
            trend_days: 3,
        };
        let stats = compliance_stats(&[], anchor(), &config);
        assert_eq!(stats.line_data.len(), 3);
        assert_eq!(stats.line_data[0].date, "2026-08-28");
    }
}
