//! Errors that abort a sweep.

use thiserror::Error;

use logsweep_core::{ConfigError, ScanError};

/// A fatal sweep error.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Invalid configuration, detected before the walk starts.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Traversal failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}
