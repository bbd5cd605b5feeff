//! Transport-agnostic service surface over a report store.
//!
//! Realizes the ingest/list/export/stats operations without committing to
//! any HTTP framework: a transport layer maps requests onto these methods
//! and renders the results.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use posturewatch_common::{validate_payload, Report, ReportPayload};

use crate::error::EngineResult;
use crate::export::csv_export;
use crate::policy::{classify, ComplianceVerdict};
use crate::query::ReportQuery;
use crate::stats::{compliance_stats, ComplianceStats, StatsConfig};
use crate::store::ReportStore;

/// A report annotated with its derived platform and verdict, for caller
/// convenience. The annotations are recomputed per request and never
/// stored.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedReport {
    #[serde(flatten)]
    pub report: Report,
    /// Normalized platform display name.
    pub platform: String,
    pub verdict: ComplianceVerdict,
}

impl AnnotatedReport {
    fn new(report: Report) -> Self {
        let platform = report.platform().name().to_string();
        let verdict = classify(&report);
        Self {
            report,
            platform,
            verdict,
        }
    }
}

/// The engine's service surface, generic over the store collaborator.
pub struct ReportService<S: ReportStore> {
    store: S,
    stats_config: StatsConfig,
}

impl<S: ReportStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StatsConfig::default())
    }

    pub fn with_config(store: S, stats_config: StatsConfig) -> Self {
        Self {
            store,
            stats_config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and append one submitted report.
    ///
    /// Rejects payloads missing `timestamp`, `diskEncryption`, or
    /// `osUpdate` without storing them. On success, returns the stored
    /// report unchanged: no server-side fields are added at ingestion.
    pub fn ingest(&self, payload: ReportPayload) -> EngineResult<Report> {
        let report = match validate_payload(payload) {
            Ok(report) => report,
            Err(err) => {
                warn!(%err, "rejected posture report");
                return Err(err.into());
            }
        };
        info!(
            machine_id = %report.machine_id,
            platform = %report.platform(),
            "ingesting posture report"
        );
        self.store.insert(report)
    }

    /// Reports matching the criteria, newest first, annotated with their
    /// derived verdicts.
    pub fn list(&self, query: &ReportQuery) -> EngineResult<Vec<AnnotatedReport>> {
        let reports = self.store.all_desc()?;
        Ok(query
            .apply(reports)
            .into_iter()
            .map(AnnotatedReport::new)
            .collect())
    }

    /// Every report flattened into the fixed CSV column set.
    pub fn export_csv(&self) -> EngineResult<String> {
        let reports = self.store.all_desc()?;
        csv_export::to_csv(&reports)
    }

    /// Snapshot proportions and the calendar-day trend, anchored at
    /// `today`.
    pub fn stats(&self, today: NaiveDate) -> EngineResult<ComplianceStats> {
        let window = self.store.recent(self.stats_config.window_size)?;
        Ok(compliance_stats(&window, today, &self.stats_config))
    }
}
