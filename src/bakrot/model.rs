use crate::error::{BakrotError, Result};
use chrono::{Duration, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Separator between the base file name and the timestamp in a backup name.
pub const BACKUP_MARKER: &str = ".backup_";

/// `chrono` format of the timestamp suffix, e.g. `20240601_134502`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

const TIMESTAMP_LEN: usize = 15;

/// A backup timestamp as embedded in the file name.
///
/// Naive local time: the suffix carries no offset and none is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BackupTimestamp(NaiveDateTime);

impl BackupTimestamp {
    pub fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for BackupTimestamp {
    fn from(at: NaiveDateTime) -> Self {
        Self(at)
    }
}

impl FromStr for BackupTimestamp {
    type Err = BakrotError;

    /// Accepts exactly `YYYYMMDD_HHMMSS`. chrono alone is lenient about field
    /// widths, so the shape is checked first.
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_shaped = bytes.len() == TIMESTAMP_LEN
            && bytes.iter().enumerate().all(|(i, b)| {
                if i == 8 {
                    *b == b'_'
                } else {
                    b.is_ascii_digit()
                }
            });
        if !well_shaped {
            return Err(BakrotError::Parse(s.to_string()));
        }

        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map(Self)
            .map_err(|_| BakrotError::Parse(s.to_string()))
    }
}

impl fmt::Display for BackupTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

/// A file that looks like a backup of the storage file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupCandidate {
    pub path: PathBuf,
    /// `None` when the name suffix is not a valid timestamp. Such candidates
    /// are never deleted automatically.
    pub timestamp: Option<BackupTimestamp>,
}

impl BackupCandidate {
    pub fn new(path: impl Into<PathBuf>, timestamp: Option<BackupTimestamp>) -> Self {
        Self {
            path: path.into(),
            timestamp,
        }
    }

    /// `suffix` is the part of the file name after [`BACKUP_MARKER`].
    pub fn from_suffix(path: PathBuf, suffix: &str) -> Self {
        let timestamp = suffix.parse().ok();
        Self { path, timestamp }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// How long backups are kept before they become eligible for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    retention_days: u32,
}

impl RetentionPolicy {
    pub fn new(retention_days: u32) -> Result<Self> {
        if retention_days == 0 {
            return Err(BakrotError::InvalidRetention(retention_days));
        }
        Ok(Self { retention_days })
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    /// Anything strictly older than this instant is past the window. A day is
    /// always 24 hours here. Windows reaching past chrono's range clamp to
    /// its minimum, which deletes nothing.
    pub fn cutoff(&self, now: NaiveDateTime) -> NaiveDateTime {
        now.checked_sub_signed(Duration::hours(24 * i64::from(self.retention_days)))
            .unwrap_or(NaiveDateTime::MIN)
    }
}

/// What a cleanup would do. Produced by [`crate::commands::plan::plan`],
/// never by looking at the disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RetentionPlan {
    pub total_found: usize,
    /// Ascending by timestamp.
    pub to_delete: Vec<BackupCandidate>,
    /// The newest timestamped backup, kept regardless of age.
    pub retained: Option<BackupCandidate>,
    pub unparsed_count: usize,
}

impl RetentionPlan {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.to_delete.iter().map(|c| c.path.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDeletion {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a best-effort batch delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletionOutcome {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<FailedDeletion>,
}

impl DeletionOutcome {
    pub fn record_removed(&mut self, path: &Path) {
        self.removed.push(path.to_path_buf());
    }

    pub fn record_failed(&mut self, path: &Path, reason: impl Into<String>) {
        self.failed.push(FailedDeletion {
            path: path.to_path_buf(),
            reason: reason.into(),
        });
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
