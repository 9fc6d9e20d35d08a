//! Core types for logsweep.
//!
//! This crate provides the building blocks shared by the scanner, the
//! retention engine and the CLI: configuration, error types, file name
//! patterns, date layouts and retention decisions.

mod config;
mod decision;
mod error;
mod layout;
mod pattern;

pub use config::{FileConfig, SweepConfig, SweepConfigBuilder};
pub use decision::{Decision, format_age};
pub use error::{ConfigError, ScanError};
pub use layout::{DateLayout, LayoutError};
pub use pattern::{DEFAULT_DATE_GROUP, DatePattern};
