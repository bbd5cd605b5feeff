//! Filter criteria and the report predicate.
//!
//! Translates caller-supplied criteria into a predicate over the report
//! population. Status filtering goes through [`classify`] and
//! [`ComplianceVerdict::is_compliant`](crate::policy::ComplianceVerdict::is_compliant)
//! so it can never diverge from the canonical policy.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use posturewatch_common::{Platform, Report};

use crate::error::{EngineError, EngineResult};
use crate::policy::{classify, ComplianceStatus};

/// Default result-set limit when the caller supplies none.
pub const DEFAULT_LIMIT: usize = 50;

/// Raw, untyped query parameters as a transport layer receives them.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub platform: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Typed filter criteria over the report population.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    /// Restrict to reports whose derived platform matches.
    pub platform: Option<Platform>,
    /// Restrict to compliant or non-compliant reports.
    pub status: Option<ComplianceStatus>,
    /// Inclusive lower bound on `timestamp`.
    pub since: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`.
    pub until: Option<DateTime<Utc>>,
    /// Maximum number of reports returned. Always positive.
    pub limit: usize,
}

impl Default for ReportQuery {
    fn default() -> Self {
        Self {
            platform: None,
            status: None,
            since: None,
            until: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ReportQuery {
    /// Build typed criteria from raw string parameters.
    ///
    /// Unknown status values and non-numeric or non-positive limits are
    /// client errors, never silently coerced. Platform strings resolve
    /// through the alias table; an unrecognized value selects the
    /// `Unknown` platform bucket rather than erroring, matching how
    /// unrecognized tags classify.
    pub fn from_params(params: &QueryParams) -> EngineResult<Self> {
        let platform = params.platform.as_deref().map(Platform::from_tag);

        let status = match params.status.as_deref() {
            Some(value) => Some(ComplianceStatus::parse(value).ok_or_else(|| {
                EngineError::query(format!(
                    "Unknown status '{}', expected 'compliant' or 'non-compliant'",
                    value
                ))
            })?),
            None => None,
        };

        let limit = match params.limit.as_deref() {
            Some(value) => {
                let parsed: usize = value.trim().parse().map_err(|_| {
                    EngineError::query(format!("Limit '{}' is not a positive integer", value))
                })?;
                if parsed == 0 {
                    return Err(EngineError::query("Limit must be greater than zero"));
                }
                parsed
            }
            None => DEFAULT_LIMIT,
        };

        let since = parse_bound(params.start_date.as_deref(), "startDate")?;
        let until = parse_bound(params.end_date.as_deref(), "endDate")?;

        Ok(Self {
            platform,
            status,
            since,
            until,
            limit,
        })
    }

    /// Whether one report satisfies every criterion.
    pub fn matches(&self, report: &Report) -> bool {
        if let Some(platform) = self.platform {
            if report.platform() != platform {
                return false;
            }
        }
        if let Some(status) = self.status {
            if classify(report).status() != status {
                return false;
            }
        }
        if let Some(since) = self.since {
            if report.timestamp < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if report.timestamp > until {
                return false;
            }
        }
        true
    }

    /// Filter a population, sort by timestamp descending, truncate to the
    /// limit.
    pub fn apply(&self, mut reports: Vec<Report>) -> Vec<Report> {
        reports.retain(|r| self.matches(r));
        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        reports.truncate(self.limit);
        reports
    }
}

fn parse_bound(value: Option<&str>, field: &str) -> EngineResult<Option<DateTime<Utc>>> {
    match value {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| {
                EngineError::query(format!(
                    "{} '{}' is not an RFC 3339 timestamp",
                    field, raw
                ))
            }),
        None => Ok(None),
    }
}
