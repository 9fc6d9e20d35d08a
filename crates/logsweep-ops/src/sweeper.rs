//! Drives a walk through the evaluator and applies its decisions.

use std::fs;

use tracing::{info, warn};

use logsweep_core::{Decision, SweepConfig, format_age};
use logsweep_scan::{Candidate, LogWalker};

use crate::error::SweepError;
use crate::evaluator::RetentionEvaluator;
use crate::outcome::{OperationError, Outcome};
use crate::summary::SweepSummary;

/// Runs a retention pass.
#[derive(Debug, Clone)]
pub struct Sweeper {
    evaluator: RetentionEvaluator,
    dry_run: bool,
}

impl Sweeper {
    /// Create a sweeper from a validated config.
    pub fn new(config: &SweepConfig) -> Result<Self, SweepError> {
        Ok(Self {
            evaluator: RetentionEvaluator::new(config)?,
            dry_run: config.dry_run,
        })
    }

    /// Compile `config`, walk its root and sweep everything found.
    pub fn run(config: &SweepConfig) -> Result<SweepSummary, SweepError> {
        let sweeper = Self::new(config)?;
        let walker = LogWalker::from_config(config);
        sweeper.sweep(&walker)
    }

    /// Sweep every candidate produced by `walker`.
    ///
    /// The first walk error stops the sweep; deletions already made stay.
    pub fn sweep(&self, walker: &LogWalker) -> Result<SweepSummary, SweepError> {
        let mut summary = SweepSummary::new();

        for candidate in walker.candidates()? {
            let candidate = candidate?;
            let outcome = self.process(&candidate);
            summary.record(&outcome);
        }

        Ok(summary)
    }

    /// Evaluate one candidate, act on the decision and log the result.
    pub fn process(&self, candidate: &Candidate) -> Outcome {
        let decision = self.evaluator.evaluate(&candidate.file_name);

        let age = match decision {
            Decision::NoMatch => {
                info!(path = %candidate.path.display(), "not matched");
                return Outcome::Skipped(decision);
            }
            Decision::UnparsableDate(ref err) => {
                warn!(path = %candidate.path.display(), error = %err, "cannot parse date");
                return Outcome::Skipped(decision);
            }
            Decision::TooRecent { age, .. } => {
                info!(path = %candidate.path.display(), age = %format_age(age), "kept");
                return Outcome::Skipped(decision);
            }
            Decision::Expired { age, .. } => age,
        };

        if self.dry_run {
            info!(path = %candidate.path.display(), age = %format_age(age), "would delete");
            return Outcome::WouldDelete { age };
        }

        let bytes = fs::symlink_metadata(&candidate.path)
            .map(|m| m.len())
            .unwrap_or(0);

        match fs::remove_file(&candidate.path) {
            Ok(()) => {
                info!(path = %candidate.path.display(), age = %format_age(age), "deleted");
                Outcome::Deleted { age, bytes }
            }
            Err(err) => {
                warn!(path = %candidate.path.display(), error = %err, "delete failed");
                Outcome::DeleteFailed {
                    age,
                    error: OperationError::new(candidate.path.clone(), err.to_string()),
                }
            }
        }
    }
}
