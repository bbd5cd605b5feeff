//! Shared data model for the posturewatch compliance engine.
//!
//! This crate provides:
//! - The canonical report model (`types`)
//! - Platform normalization from free-text tags (`types::Platform`)
//! - Ingestion payload validation (`validation`)

pub mod types;
pub mod validation;

pub use types::{Antivirus, Control, DiskEncryption, OsUpdate, Platform, Report, SleepSettings};
pub use validation::{validate_payload, ReportPayload, ValidationError};

/// Version information for the common crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
