//! Directory traversal for logsweep.
//!
//! Walks a directory tree serially with jwalk and yields every
//! non-directory entry as a [`Candidate`] for retention evaluation.
//!
//! # Example
//!
//! ```rust,no_run
//! use logsweep_scan::LogWalker;
//!
//! let walker = LogWalker::new("/var/log/app");
//! for candidate in walker.candidates().unwrap() {
//!     let candidate = candidate.unwrap();
//!     println!("{}", candidate.path.display());
//! }
//! ```

mod walker;

pub use walker::{Candidate, Candidates, LogWalker};

// Re-export core types for convenience
pub use logsweep_core::{ScanError, SweepConfig};
