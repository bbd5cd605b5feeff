//! The report store seam and the in-memory reference implementation.
//!
//! Persistence technology is a collaborator, not part of the engine. The
//! trait is the only surface the engine touches; production deployments
//! plug in their own backend, tests and the CLI use the in-memory store.

use std::sync::RwLock;

use tracing::debug;

use posturewatch_common::Report;

use crate::error::{EngineError, EngineResult};

/// Abstract report population.
///
/// Implementations surface their own failures as store errors; the engine
/// never swallows them or partially applies an operation.
pub trait ReportStore: Send + Sync {
    /// Append one report. A single unconditional insert: no merge, dedup,
    /// or upsert by machine id, so repeated submissions from one device
    /// accumulate as independent historical rows.
    fn insert(&self, report: Report) -> EngineResult<Report>;

    /// Every report, sorted by timestamp descending.
    fn all_desc(&self) -> EngineResult<Vec<Report>>;

    /// The `limit` most recent reports, timestamp descending.
    fn recent(&self, limit: usize) -> EngineResult<Vec<Report>> {
        let mut reports = self.all_desc()?;
        reports.truncate(limit);
        Ok(reports)
    }
}

/// In-memory store backed by an `RwLock`ed vector.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with an existing population.
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportStore for MemoryReportStore {
    fn insert(&self, report: Report) -> EngineResult<Report> {
        let mut reports = self
            .reports
            .write()
            .map_err(|_| EngineError::store("report store lock poisoned"))?;
        reports.push(report.clone());
        debug!(count = reports.len(), "report appended to in-memory store");
        Ok(report)
    }

    fn all_desc(&self) -> EngineResult<Vec<Report>> {
        let reports = self
            .reports
            .read()
            .map_err(|_| EngineError::store("report store lock poisoned"))?;
        let mut sorted = reports.clone();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sorted)
    }
}
