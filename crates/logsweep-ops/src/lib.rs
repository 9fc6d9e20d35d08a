//! Retention engine for logsweep.
//!
//! Evaluates each walked file against the date pattern and retention window,
//! then deletes expired files (or only logs them in dry-run mode). Per-file
//! problems are logged and counted; only configuration and traversal errors
//! stop a sweep.
//!
//! ```rust,no_run
//! use logsweep_core::SweepConfig;
//! use logsweep_ops::Sweeper;
//!
//! let config = SweepConfig::builder()
//!     .root("/var/log/app")
//!     .pattern(r"^app-(?P<date>\d{8})\.log$")
//!     .layout("%Y%m%d")
//!     .keep_days(7i64)
//!     .build()
//!     .unwrap();
//!
//! let summary = Sweeper::run(&config).unwrap();
//! println!("deleted {} files", summary.deleted);
//! ```

mod error;
mod evaluator;
mod outcome;
mod summary;
mod sweeper;

pub use error::SweepError;
pub use evaluator::RetentionEvaluator;
pub use outcome::{OperationError, Outcome};
pub use summary::SweepSummary;
pub use sweeper::Sweeper;
