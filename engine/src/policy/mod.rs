//! Compliance verdicts and the classification entry point.

pub mod rules;

use serde::{Deserialize, Serialize};

use posturewatch_common::{Control, Report};

/// Per-control pass/fail verdicts for one report.
///
/// Derived and never persisted: every query recomputes verdicts from the
/// raw signals, so retroactive policy changes apply to historical data
/// automatically.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceVerdict {
    pub encrypted: bool,
    pub updated: bool,
    pub av_active: bool,
    pub sleep_ok: bool,
}

impl ComplianceVerdict {
    /// The compliance policy: every control must pass.
    ///
    /// This conjunction is the sole policy implementation in the workspace.
    /// Filtering, statistics, export, and display all call it; none of them
    /// re-derive compliance from raw strings.
    pub fn is_compliant(&self) -> bool {
        self.encrypted && self.updated && self.av_active && self.sleep_ok
    }

    /// The verdict for one control.
    pub fn control(&self, control: Control) -> bool {
        match control {
            Control::Encryption => self.encrypted,
            Control::Updates => self.updated,
            Control::Antivirus => self.av_active,
            Control::Sleep => self.sleep_ok,
        }
    }

    /// Controls that failed, in reporting order.
    pub fn failing_controls(&self) -> Vec<Control> {
        Control::ALL
            .into_iter()
            .filter(|c| !self.control(*c))
            .collect()
    }

    /// The overall status as a label-bearing enum.
    pub fn status(&self) -> ComplianceStatus {
        if self.is_compliant() {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        }
    }
}

/// Classify one report into per-control verdicts.
pub fn classify(report: &Report) -> ComplianceVerdict {
    let platform = report.platform();
    ComplianceVerdict {
        encrypted: rules::check_encryption(platform, &report.disk_encryption),
        updated: rules::check_updates(&report.os_update),
        av_active: rules::check_antivirus(report.antivirus.as_ref()),
        sleep_ok: rules::check_sleep(report.sleep_settings.as_ref()),
    }
}

/// Overall compliance status, as used in filter criteria and export labels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

impl ComplianceStatus {
    /// Parse a caller-supplied status string (`compliant`/`non-compliant`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compliant" => Some(ComplianceStatus::Compliant),
            "non-compliant" => Some(ComplianceStatus::NonCompliant),
            _ => None,
        }
    }

    /// Display label for exports.
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }
}
