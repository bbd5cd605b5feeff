//! Individual control classifiers.
//!
//! Each function evaluates one control from a report's raw signals and
//! returns a pass/fail verdict. Functions take the minimum arguments needed
//! so they can be unit-tested in isolation. None of them may panic on
//! malformed input: every parse failure degrades to the documented
//! sentinel or false value.

use posturewatch_common::{Antivirus, DiskEncryption, OsUpdate, Platform, SleepSettings};

/// Sleep timeout, in minutes, substituted when the reported value is absent
/// or unparseable. Fails the sleep control.
pub const SLEEP_TIMEOUT_SENTINEL: i64 = 999;

/// Maximum sleep/lock timeout, in minutes, that still passes the control.
pub const MAX_SLEEP_TIMEOUT_MINUTES: i64 = 30;

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

/// Disk encryption, dispatched on the derived platform.
///
/// Windows looks for BitLocker, macOS for FileVault, Linux for LUKS. An
/// unknown platform always fails: without a platform there is no trusted
/// marker to look for, and a bare substring match on "Encrypted" would also
/// match "Not Encrypted".
pub fn check_encryption(platform: Platform, disk: &DiskEncryption) -> bool {
    let marker = match platform {
        Platform::Windows => "BitLocker",
        Platform::MacOs => "FileVault",
        Platform::Linux => "LUKS",
        Platform::Unknown => return false,
    };
    disk.encryption.contains(marker)
}

// ---------------------------------------------------------------------------
// OS updates
// ---------------------------------------------------------------------------

/// OS update state, platform-independent substring match.
pub fn check_updates(os_update: &OsUpdate) -> bool {
    os_update.update_status.contains("Up to Date")
}

// ---------------------------------------------------------------------------
// Antivirus
// ---------------------------------------------------------------------------

/// Antivirus state. Exact string equality, not substring: collectors emit
/// the literal `"Enabled"` when the resident shield is active, and values
/// like "Enabled (stale definitions)" must not pass.
pub fn check_antivirus(antivirus: Option<&Antivirus>) -> bool {
    antivirus.map_or(false, |av| av.antivirus == "Enabled")
}

// ---------------------------------------------------------------------------
// Sleep timeout
// ---------------------------------------------------------------------------

/// Sleep/lock timeout. Passes iff the parsed value is at most
/// [`MAX_SLEEP_TIMEOUT_MINUTES`].
pub fn check_sleep(sleep: Option<&SleepSettings>) -> bool {
    sleep_timeout_minutes(sleep) <= MAX_SLEEP_TIMEOUT_MINUTES
}

/// Parse the reported sleep timeout, degrading to the sentinel when the
/// record is absent or the value is not an integer.
pub fn sleep_timeout_minutes(sleep: Option<&SleepSettings>) -> i64 {
    sleep
        .and_then(|s| s.sleep_timeout_minutes.trim().parse::<i64>().ok())
        .unwrap_or(SLEEP_TIMEOUT_SENTINEL)
}
