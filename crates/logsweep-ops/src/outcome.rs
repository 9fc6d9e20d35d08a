//! Results of processing a candidate.

use std::path::PathBuf;

use chrono::TimeDelta;

use logsweep_core::Decision;

/// What happened to a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Left alone: no match, unparsable date, or too recent.
    Skipped(Decision),
    /// Expired, but running in dry-run mode.
    WouldDelete { age: TimeDelta },
    /// Expired and removed.
    Deleted { age: TimeDelta, bytes: u64 },
    /// Expired, but removal failed.
    DeleteFailed { age: TimeDelta, error: OperationError },
}

/// An error that occurred while removing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationError {
    /// The path that caused the error.
    pub path: PathBuf,
    /// A human-readable error message.
    pub message: String,
}

impl OperationError {
    /// Create a new operation error.
    pub fn new(path: PathBuf, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for OperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
