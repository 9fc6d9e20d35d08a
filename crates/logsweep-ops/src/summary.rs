//! Per-run counters.

use logsweep_core::Decision;

use crate::outcome::{OperationError, Outcome};

/// Tally of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Candidates evaluated.
    pub scanned: usize,
    /// Names that did not match the pattern.
    pub unmatched: usize,
    /// Matches whose date could not be parsed.
    pub unparsable: usize,
    /// Files kept because they are inside the retention window.
    pub kept: usize,
    /// Files that would have been deleted in a dry run.
    pub would_delete: usize,
    /// Files deleted.
    pub deleted: usize,
    /// Files whose deletion failed.
    pub failed: usize,
    /// Bytes freed by deletions.
    pub bytes_reclaimed: u64,
    /// Deletion errors, in visit order.
    pub errors: Vec<OperationError>,
}

impl SweepSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one outcome.
    pub fn record(&mut self, outcome: &Outcome) {
        self.scanned += 1;
        match outcome {
            Outcome::Skipped(Decision::NoMatch) => self.unmatched += 1,
            Outcome::Skipped(Decision::UnparsableDate(_)) => self.unparsable += 1,
            Outcome::Skipped(_) => self.kept += 1,
            Outcome::WouldDelete { .. } => self.would_delete += 1,
            Outcome::Deleted { bytes, .. } => {
                self.deleted += 1;
                self.bytes_reclaimed += bytes;
            }
            Outcome::DeleteFailed { error, .. } => {
                self.failed += 1;
                self.errors.push(error.clone());
            }
        }
    }

    /// Number of files that reached the retention window.
    pub fn expired(&self) -> usize {
        self.would_delete + self.deleted + self.failed
    }

    /// Whether any deletion failed.
    pub fn has_errors(&self) -> bool {
        self.failed > 0
    }
}
