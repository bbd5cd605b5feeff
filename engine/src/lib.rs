//! Compliance classification and aggregation engine for endpoint posture
//! reports.
//!
//! This crate provides:
//! - Per-control classification of raw posture signals (`policy`)
//! - Query filtering over a report population (`query`)
//! - Fleet-wide snapshot and trend statistics (`stats`)
//! - Flattened CSV export (`export`)
//! - The report store seam and service surface (`store`, `service`)
//!
//! Classification, filtering, and aggregation are pure and side-effect
//! free; the only effectful operation is report ingestion through the
//! store seam.

pub mod error;
pub mod export;
pub mod policy;
pub mod query;
pub mod service;
pub mod stats;
pub mod store;

pub use error::{EngineError, EngineResult};
pub use policy::{classify, ComplianceStatus, ComplianceVerdict};
pub use query::ReportQuery;
pub use service::{AnnotatedReport, ReportService};
pub use stats::{ComplianceStats, StatsConfig};
pub use store::{MemoryReportStore, ReportStore};
